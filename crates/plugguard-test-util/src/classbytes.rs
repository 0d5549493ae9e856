//! Minimal class-artifact builder.
//!
//! Emits just enough of the class file format for the registry's shape
//! parser: magic, a constant pool holding the class/super/interface names,
//! access flags, and empty field/method/attribute tables.

const MAGIC: u32 = 0xCAFE_BABE;
const ACC_PUBLIC: u16 = 0x0001;
const ACC_SUPER: u16 = 0x0020;
const ACC_INTERFACE: u16 = 0x0200;
const ACC_ABSTRACT: u16 = 0x0400;

/// Bytes of a public class `name` extending `super_name` (or the format's
/// implicit root when `None`) and implementing `interfaces`. Names are
/// dotted; internal slashed form is produced here.
pub fn class_bytes(name: &str, super_name: Option<&str>, interfaces: &[&str]) -> Vec<u8> {
    build(name, super_name, interfaces, ACC_PUBLIC | ACC_SUPER)
}

/// Bytes of a public interface `name` extending `interfaces`.
pub fn interface_bytes(name: &str, interfaces: &[&str]) -> Vec<u8> {
    build(
        name,
        Some("java.lang.Object"),
        interfaces,
        ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT,
    )
}

fn build(name: &str, super_name: Option<&str>, interfaces: &[&str], access: u16) -> Vec<u8> {
    let mut pool: Vec<u8> = Vec::new();
    let mut next_index: u16 = 1;

    // Each named class costs two pool entries: Utf8 then Class.
    let mut add_class = |pool: &mut Vec<u8>, dotted: &str| -> u16 {
        let internal = dotted.replace('.', "/");
        pool.push(1); // CONSTANT_Utf8
        pool.extend_from_slice(&(internal.len() as u16).to_be_bytes());
        pool.extend_from_slice(internal.as_bytes());
        let utf8_index = next_index;
        pool.push(7); // CONSTANT_Class
        pool.extend_from_slice(&utf8_index.to_be_bytes());
        let class_index = next_index + 1;
        next_index += 2;
        class_index
    };

    let this_index = add_class(&mut pool, name);
    let super_index = super_name.map(|s| add_class(&mut pool, s)).unwrap_or(0);
    let interface_indices: Vec<u16> = interfaces
        .iter()
        .map(|i| add_class(&mut pool, i))
        .collect();

    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(&MAGIC.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // minor
    out.extend_from_slice(&52u16.to_be_bytes()); // major (Java 8)
    out.extend_from_slice(&next_index.to_be_bytes()); // cp count = entries + 1
    out.extend_from_slice(&pool);
    out.extend_from_slice(&access.to_be_bytes());
    out.extend_from_slice(&this_index.to_be_bytes());
    out.extend_from_slice(&super_index.to_be_bytes());
    out.extend_from_slice(&(interface_indices.len() as u16).to_be_bytes());
    for index in &interface_indices {
        out.extend_from_slice(&index.to_be_bytes());
    }
    out.extend_from_slice(&0u16.to_be_bytes()); // fields
    out.extend_from_slice(&0u16.to_be_bytes()); // methods
    out.extend_from_slice(&0u16.to_be_bytes()); // attributes
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_bytes_start_with_magic() {
        let bytes = class_bytes("com.example.Impl", Some("java.lang.Object"), &[]);
        assert_eq!(&bytes[0..4], &MAGIC.to_be_bytes());
    }

    #[test]
    fn interface_bytes_set_interface_flag() {
        let bytes = interface_bytes("com.example.Api", &[]);
        // access flags sit right after the constant pool; easiest check is
        // that the flag word appears with the interface bit set.
        let flags = (ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT).to_be_bytes();
        assert!(bytes.windows(2).any(|w| w == flags));
    }
}

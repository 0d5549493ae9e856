//! Minimal class-artifact shape parser.
//!
//! Reads exactly the prefix of the class file format needed for structural
//! verification: constant pool, access flags, this/super class, and the
//! interface table. Member tables and attributes are never touched. The
//! parser must never panic on arbitrary bytes; every read is bounds
//! checked.

use thiserror::Error;

const MAGIC: u32 = 0xCAFE_BABE;
const ACC_INTERFACE: u16 = 0x0200;

#[derive(Debug, Error)]
pub enum ClassFileError {
    #[error("truncated class artifact")]
    Truncated,
    #[error("bad magic {0:#010x}")]
    BadMagic(u32),
    #[error("unsupported constant pool tag {tag} at index {index}")]
    UnsupportedTag { tag: u8, index: u16 },
    #[error("constant pool index {0} out of range or of wrong kind")]
    BadPoolIndex(u16),
}

/// Kind of a parsed or ambient type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
}

/// Structural shape of one type: its name and direct supertypes. Names are
/// dotted (`com.example.Impl`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Direct supertypes: superclass first, then interfaces in declaration
    /// order.
    pub fn direct_supertypes(&self) -> impl Iterator<Item = &str> {
        self.super_name
            .as_deref()
            .into_iter()
            .chain(self.interfaces.iter().map(String::as_str))
    }
}

/// Conventional compiled-artifact path for a dotted type name
/// (`com.example.Impl` -> `com/example/Impl.class`).
pub fn artifact_rel_path(dotted: &str) -> String {
    format!("{}.class", dotted.replace('.', "/"))
}

/// Parse the shape of a class artifact.
pub fn parse_class(bytes: &[u8]) -> Result<TypeDescriptor, ClassFileError> {
    let mut r = Reader { bytes, pos: 0 };

    let magic = r.u32()?;
    if magic != MAGIC {
        return Err(ClassFileError::BadMagic(magic));
    }
    let _minor = r.u16()?;
    let _major = r.u16()?;

    let pool = read_constant_pool(&mut r)?;

    let access_flags = r.u16()?;
    let this_index = r.u16()?;
    let super_index = r.u16()?;
    let interface_count = r.u16()?;

    let name = class_name(&pool, this_index)?;
    let super_name = if super_index == 0 {
        None
    } else {
        Some(class_name(&pool, super_index)?)
    };
    let mut interfaces = Vec::with_capacity(interface_count as usize);
    for _ in 0..interface_count {
        interfaces.push(class_name(&pool, r.u16()?)?);
    }

    let kind = if access_flags & ACC_INTERFACE != 0 {
        TypeKind::Interface
    } else {
        TypeKind::Class
    };

    Ok(TypeDescriptor {
        name,
        super_name,
        interfaces,
        kind,
    })
}

/// Only the two entry kinds we resolve are kept; everything else is parsed
/// for its size and recorded as `Other` so indices stay aligned.
enum PoolEntry {
    Utf8(String),
    Class(u16),
    Other,
    /// Second slot of an 8-byte constant.
    Continuation,
}

fn read_constant_pool(r: &mut Reader<'_>) -> Result<Vec<PoolEntry>, ClassFileError> {
    let count = r.u16()?;
    // Index 0 is unused by the format.
    let mut pool: Vec<PoolEntry> = Vec::with_capacity(count as usize);
    pool.push(PoolEntry::Other);

    let mut index: u16 = 1;
    while index < count {
        let tag = r.u8()?;
        let entry = match tag {
            1 => {
                let len = r.u16()? as usize;
                let raw = r.take(len)?;
                PoolEntry::Utf8(String::from_utf8_lossy(raw).into_owned())
            }
            7 => PoolEntry::Class(r.u16()?),
            8 | 16 | 19 | 20 => {
                r.take(2)?;
                PoolEntry::Other
            }
            15 => {
                r.take(3)?;
                PoolEntry::Other
            }
            3 | 4 | 9 | 10 | 11 | 12 | 17 | 18 => {
                r.take(4)?;
                PoolEntry::Other
            }
            5 | 6 => {
                r.take(8)?;
                PoolEntry::Other
            }
            tag => return Err(ClassFileError::UnsupportedTag { tag, index }),
        };
        let wide = matches!(tag, 5 | 6);
        pool.push(entry);
        index += 1;
        if wide {
            // 8-byte constants occupy two pool slots.
            pool.push(PoolEntry::Continuation);
            index += 1;
        }
    }
    Ok(pool)
}

fn class_name(pool: &[PoolEntry], index: u16) -> Result<String, ClassFileError> {
    let Some(PoolEntry::Class(utf8_index)) = pool.get(index as usize) else {
        return Err(ClassFileError::BadPoolIndex(index));
    };
    let Some(PoolEntry::Utf8(internal)) = pool.get(*utf8_index as usize) else {
        return Err(ClassFileError::BadPoolIndex(*utf8_index));
    };
    Ok(internal.replace('/', "."))
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], ClassFileError> {
        let end = self.pos.checked_add(n).ok_or(ClassFileError::Truncated)?;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(ClassFileError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ClassFileError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ClassFileError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ClassFileError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

use std::{cell::OnceCell, mem};

use enum_map::{Enum, EnumMap};
use enumflags2::{bitflags, BitFlags};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbiType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Usize,
    StrView,
    Ptr,
    Void,
}

impl AbiType {
    pub fn size(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 => 4,
            Self::I64 | Self::U64 => 8,
            Self::Usize => mem::size_of::<usize>(),
            Self::StrView => mem::size_of::<reef_core::StrView>(),
            Self::Ptr => mem::size_of::<*mut u8>(),
            Self::Void => 0,
        }
    }

    pub fn align(self) -> usize {
        match self {
            Self::I8 | Self::U8 => mem::align_of::<u8>(),
            Self::I16 | Self::U16 => mem::align_of::<u16>(),
            Self::I32 | Self::U32 => mem::align_of::<u32>(),
            Self::I64 | Self::U64 => mem::align_of::<u64>(),
            Self::Usize => mem::align_of::<usize>(),
            Self::StrView => mem::align_of::<reef_core::StrView>(),
            Self::Ptr => mem::align_of::<*mut u8>(),
            Self::Void => 1,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }
}

/// Observable behaviour of a runtime call, so the compiler knows which calls
/// it may never drop or reorder.
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    WritesStdout = 0b001,
    ReadsArgumentMemory = 0b010,
    Allocates = 0b100,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<AbiType>,
    pub ret: AbiType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub symbol: String,
    pub signature: Signature,
    pub effects: BitFlags<Effect>,
}

#[derive(Debug, Enum, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeFunction {
    PrintString,
    PrintI8,
    PrintI16,
    PrintI32,
    PrintI64,
    PrintU8,
    PrintU16,
    PrintU32,
    PrintU64,
    Allocate,
}

impl RuntimeFunction {
    /// The printer for values of `ty`, if `ty` is one of the printable integers.
    pub fn print_int(ty: AbiType) -> Option<Self> {
        Some(match ty {
            AbiType::I8 => Self::PrintI8,
            AbiType::I16 => Self::PrintI16,
            AbiType::I32 => Self::PrintI32,
            AbiType::I64 => Self::PrintI64,
            AbiType::U8 => Self::PrintU8,
            AbiType::U16 => Self::PrintU16,
            AbiType::U32 => Self::PrintU32,
            AbiType::U64 => Self::PrintU64,
            _ => return None,
        })
    }

    pub fn symbol(self) -> &'static str {
        self.into()
    }

    pub fn signature(self) -> Signature {
        let (params, ret) = match self {
            Self::PrintString => (vec![AbiType::StrView], AbiType::Void),
            Self::PrintI8 => (vec![AbiType::I8], AbiType::Void),
            Self::PrintI16 => (vec![AbiType::I16], AbiType::Void),
            Self::PrintI32 => (vec![AbiType::I32], AbiType::Void),
            Self::PrintI64 => (vec![AbiType::I64], AbiType::Void),
            Self::PrintU8 => (vec![AbiType::U8], AbiType::Void),
            Self::PrintU16 => (vec![AbiType::U16], AbiType::Void),
            Self::PrintU32 => (vec![AbiType::U32], AbiType::Void),
            Self::PrintU64 => (vec![AbiType::U64], AbiType::Void),
            Self::Allocate => (vec![AbiType::Usize], AbiType::Ptr),
        };
        Signature { params, ret }
    }

    pub fn effects(self) -> BitFlags<Effect> {
        match self {
            Self::PrintString => Effect::WritesStdout | Effect::ReadsArgumentMemory,
            Self::Allocate => Effect::Allocates.into(),
            _ => Effect::WritesStdout.into(),
        }
    }

    pub fn declaration(self) -> Declaration {
        Declaration {
            symbol: self.symbol().to_owned(),
            signature: self.signature(),
            effects: self.effects(),
        }
    }
}

impl From<RuntimeFunction> for &'static str {
    fn from(funct: RuntimeFunction) -> Self {
        match funct {
            RuntimeFunction::PrintString => "print_string",
            RuntimeFunction::PrintI8 => "print_i8",
            RuntimeFunction::PrintI16 => "print_i16",
            RuntimeFunction::PrintI32 => "print_i32",
            RuntimeFunction::PrintI64 => "print_i64",
            RuntimeFunction::PrintU8 => "print_u8",
            RuntimeFunction::PrintU16 => "print_u16",
            RuntimeFunction::PrintU32 => "print_u32",
            RuntimeFunction::PrintU64 => "print_u64",
            RuntimeFunction::Allocate => "allocate",
        }
    }
}

/// Declarations a compilation unit has asked for, built on first use.
#[derive(Default)]
pub struct RuntimeFunctions {
    functions: EnumMap<RuntimeFunction, OnceCell<Declaration>>,
}

impl RuntimeFunctions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, funct: RuntimeFunction) -> &Declaration {
        self.functions[funct].get_or_init(|| {
            log::trace!("declaring runtime function {}", funct.symbol());
            funct.declaration()
        })
    }

    pub fn declare_all(&self) {
        for (funct, _) in &self.functions {
            self.get(funct);
        }
    }

    /// Declarations requested so far, in a fixed order.
    pub fn used(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.functions.values().filter_map(OnceCell::get)
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn symbols_are_unique() {
        let table = RuntimeFunctions::new();
        table.declare_all();
        let symbols: HashSet<_> = table.used().map(|decl| decl.symbol.as_str()).collect();
        assert_eq!(symbols.len(), RuntimeFunction::LENGTH);
        assert!(symbols.contains("print_string"));
        assert!(symbols.contains("allocate"));
    }

    #[test]
    fn int_printers() {
        for ty in [
            AbiType::I8,
            AbiType::I16,
            AbiType::I32,
            AbiType::I64,
            AbiType::U8,
            AbiType::U16,
            AbiType::U32,
            AbiType::U64,
        ] {
            let funct = RuntimeFunction::print_int(ty).unwrap();
            assert_eq!(funct.signature().params, vec![ty]);
            assert_eq!(funct.signature().ret, AbiType::Void);
            assert!(funct.symbol().ends_with(&(ty.size() * 8).to_string()));
            let prefix = if ty.is_signed() { "print_i" } else { "print_u" };
            assert!(funct.symbol().starts_with(prefix));
        }
        assert_eq!(RuntimeFunction::print_int(AbiType::StrView), None);
        assert_eq!(RuntimeFunction::print_int(AbiType::Usize), None);
    }

    #[test]
    fn signed_printers_are_named_i() {
        assert_eq!(RuntimeFunction::print_int(AbiType::I32).unwrap().symbol(), "print_i32");
        assert_eq!(RuntimeFunction::print_int(AbiType::U8).unwrap().symbol(), "print_u8");
    }

    #[test]
    fn str_view_is_two_words() {
        assert_eq!(AbiType::StrView.size(), 2 * AbiType::Usize.size());
        assert_eq!(AbiType::StrView.align(), AbiType::Usize.align());
    }

    #[test]
    fn effects() {
        assert!(RuntimeFunction::PrintString
            .effects()
            .contains(Effect::ReadsArgumentMemory));
        assert_eq!(
            RuntimeFunction::PrintU16.effects(),
            BitFlags::from_flag(Effect::WritesStdout)
        );
        assert!(!RuntimeFunction::Allocate.effects().contains(Effect::WritesStdout));
    }

    #[test]
    fn used_lists_requests_once() {
        let table = RuntimeFunctions::new();
        assert_eq!(table.used().count(), 0);

        table.get(RuntimeFunction::Allocate);
        table.get(RuntimeFunction::PrintI64);
        table.get(RuntimeFunction::Allocate);

        let symbols: Vec<_> = table.used().map(|decl| decl.symbol.clone()).collect();
        assert_eq!(symbols, ["print_i64", "allocate"]);
    }
}

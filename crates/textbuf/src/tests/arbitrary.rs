use alloc::{boxed::Box, vec::Vec};

use quickcheck::{Arbitrary, Gen};

/// One edit in a randomly generated session.
///
/// Indices are raw; the driver reduces them modulo the current length so every
/// generated operation is legal.
#[derive(Debug, Clone)]
pub(crate) enum Op {
    Overwrite(Vec<u8>),
    Append(Vec<u8>),
    AppendFormat(u32),
    Insert(usize, Vec<u8>),
    InsertFormat(usize, i16),
    Erase(usize, usize),
    Push(u8),
    Pop,
    Put(usize, u8),
    Clear,
    Expand(usize),
    Shrink,
    Lower,
    Upper,
    Quote,
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match usize::arbitrary(g) % 15 {
            0 => Op::Overwrite(Vec::arbitrary(g)),
            1 => Op::Append(Vec::arbitrary(g)),
            2 => Op::AppendFormat(u32::arbitrary(g)),
            3 => Op::Insert(usize::arbitrary(g), Vec::arbitrary(g)),
            4 => Op::InsertFormat(usize::arbitrary(g), i16::arbitrary(g)),
            5 => Op::Erase(usize::arbitrary(g), usize::arbitrary(g)),
            6 => Op::Push(u8::arbitrary(g)),
            7 => Op::Pop,
            8 => Op::Put(usize::arbitrary(g), u8::arbitrary(g)),
            9 => Op::Clear,
            10 => Op::Expand(usize::arbitrary(g) % 512),
            11 => Op::Shrink,
            12 => Op::Lower,
            13 => Op::Upper,
            _ => Op::Quote,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Op::Overwrite(bytes) => Box::new(bytes.shrink().map(Op::Overwrite)),
            Op::Append(bytes) => Box::new(bytes.shrink().map(Op::Append)),
            Op::Insert(index, bytes) => {
                let index = *index;
                Box::new(bytes.shrink().map(move |bytes| Op::Insert(index, bytes)))
            }
            _ => quickcheck::empty_shrinker(),
        }
    }
}

//! Model-based property: a random edit session applied to a [`Text`] and to a
//! plain `Vec<u8>` must always agree, and every operation must leave the
//! buffer's invariants intact.

use alloc::{format, string::ToString, vec, vec::Vec};

use quickcheck::QuickCheck;

use super::{arbitrary::Op, test_count};
use crate::{Text, config::DEFAULT_CAPACITY};

/// Quoting multiplies the size; stop quoting once content gets this large.
const QUOTE_LIMIT: usize = 256;

pub(crate) fn reference_quote(src: &[u8]) -> Vec<u8> {
    let mut out = vec![b'"'];
    for &byte in src {
        match byte {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'/' => out.extend_from_slice(b"\\/"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0C => out.extend_from_slice(b"\\f"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x20..=0x7E => out.push(byte),
            _ => out.extend_from_slice(format!("\\u{byte:04X}").as_bytes()),
        }
    }
    out.push(b'"');
    out
}

fn check_invariants(text: &Text, model: &[u8]) -> bool {
    text.as_bytes() == model
        && text.len() == model.len()
        && text.len() <= text.capacity()
        && text.as_bytes_with_nul()[text.len()] == 0
}

#[allow(clippy::too_many_lines)]
fn apply(text: Text, model: &mut Vec<u8>, op: &Op) -> Option<Text> {
    let text = match op {
        Op::Overwrite(bytes) => {
            model.clone_from(bytes);
            text.overwrite_with_bytes(bytes)
        }
        Op::Append(bytes) => {
            if bytes.is_empty() {
                return Some(text);
            }
            model.extend_from_slice(bytes);
            text.append_bytes(bytes)
        }
        Op::AppendFormat(n) => {
            model.extend_from_slice(n.to_string().as_bytes());
            text.append_format(format_args!("{n}"))
        }
        Op::Insert(index, bytes) => {
            let index = index % (model.len() + 1);
            model.splice(index..index, bytes.iter().copied());
            text.insert_bytes(index, bytes)
        }
        Op::InsertFormat(index, n) => {
            let index = index % (model.len() + 1);
            let rendered = format!("<{n:+}>");
            model.splice(index..index, rendered.bytes());
            text.insert_format(index, format_args!("<{n:+}>"))
        }
        Op::Erase(a, b) => {
            let a = a % (model.len() + 1);
            let b = b % (model.len() + 1);
            let (start, end) = (a.min(b), a.max(b));
            let capacity = text.capacity();
            let mut text = text;
            model.drain(start..end);
            text.erase_range(start..end);
            if text.capacity() != capacity {
                return None;
            }
            text
        }
        Op::Push(byte) => {
            model.push(*byte);
            text.push(*byte)
        }
        Op::Pop => {
            let mut text = text;
            if let Some(expected) = model.pop() {
                if text.pop() != expected {
                    return None;
                }
            } else if text.try_pop().is_ok() {
                return None;
            }
            text
        }
        Op::Put(index, byte) => {
            let mut text = text;
            if !model.is_empty() {
                let index = index % model.len();
                let previous = core::mem::replace(&mut model[index], *byte);
                if text.put(index, *byte) != previous {
                    return None;
                }
            }
            text
        }
        Op::Clear => {
            let mut text = text;
            let capacity = text.capacity();
            model.clear();
            text.clear();
            if text.capacity() != capacity {
                return None;
            }
            text
        }
        Op::Expand(requested) => {
            let capacity = text.capacity();
            let text = text.expand_to_fit(*requested);
            if text.capacity() < capacity.max(*requested) {
                return None;
            }
            text
        }
        Op::Shrink => {
            let text = text.shrink_to_fit();
            if text.capacity() != model.len() {
                return None;
            }
            text
        }
        Op::Lower => {
            let mut text = text;
            model.make_ascii_lowercase();
            text.lower();
            text
        }
        Op::Upper => {
            let mut text = text;
            model.make_ascii_uppercase();
            text.upper();
            text
        }
        Op::Quote => {
            if model.len() > QUOTE_LIMIT {
                return Some(text);
            }
            *model = reference_quote(model);
            let text = text.quote();
            if text.capacity() < DEFAULT_CAPACITY {
                return None;
            }
            text
        }
    };
    check_invariants(&text, model).then_some(text)
}

#[test]
fn edit_sessions_match_vec_model() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(initial: Vec<u8>, ops: Vec<Op>) -> bool {
        let mut model = initial.clone();
        let mut text = Text::from_bytes(&initial);
        for op in &ops {
            match apply(text, &mut model, op) {
                Some(next) => text = next,
                None => return false,
            }
        }
        true
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u8>, Vec<Op>) -> bool);
}

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textbuf::{Text, TextError};

/// Quoting grows content up to sixfold; skip it past this length.
const QUOTE_LIMIT: usize = 4096;

#[derive(Debug, Arbitrary)]
enum Op {
    Overwrite(Vec<u8>),
    Append(Vec<u8>),
    AppendNumber(u64),
    Insert(u16, Vec<u8>),
    Erase(u16, u16),
    Push(u8),
    Pop,
    Put(u16, u8),
    /// Arguments past the end, offset from `len()` by the given amounts.
    OutOfRange(u8, u8),
    SetLength(u16),
    Clear,
    Expand(u16),
    Shrink,
    Lower,
    Upper,
    Quote,
}

#[derive(Debug, Arbitrary)]
struct Session {
    initial: Vec<u8>,
    ops: Vec<Op>,
}

fn check(text: &Text, model: &[u8]) {
    assert_eq!(text.as_bytes(), model);
    assert!(text.len() <= text.capacity());
    assert_eq!(text.as_bytes_with_nul()[text.len()], 0);
}

fn quote_round_trips(text: &Text, src: &[u8]) {
    let json = core::str::from_utf8(text.as_bytes()).expect("quoted text is ascii");
    let decoded: String = serde_json::from_str(json).expect("quoted text is a JSON string");
    assert!(decoded.chars().map(u32::from).eq(src.iter().map(|&b| u32::from(b))));
}

fn run(session: Session) {
    let mut model = session.initial.clone();
    let mut text = Text::from_bytes(&session.initial);
    check(&text, &model);

    for op in session.ops {
        text = match op {
            Op::Overwrite(bytes) => {
                model.clone_from(&bytes);
                text.overwrite_with_bytes(&bytes)
            }
            Op::Append(bytes) => {
                if bytes.is_empty() {
                    // The consuming form drops its buffer on error.
                    let rejected = text.duplicate().try_append_bytes(&bytes);
                    assert_eq!(rejected.unwrap_err(), TextError::EmptyAppend);
                    text
                } else {
                    model.extend_from_slice(&bytes);
                    text.append_bytes(&bytes)
                }
            }
            Op::AppendNumber(n) => {
                model.extend_from_slice(n.to_string().as_bytes());
                text.append_format(format_args!("{n}"))
            }
            Op::Insert(index, bytes) => {
                let index = usize::from(index) % (model.len() + 1);
                model.splice(index..index, bytes.iter().copied());
                text.insert_bytes(index, &bytes)
            }
            Op::Erase(a, b) => {
                let a = usize::from(a) % (model.len() + 1);
                let b = usize::from(b) % (model.len() + 1);
                let (start, end) = (a.min(b), a.max(b));
                let capacity = text.capacity();
                model.drain(start..end);
                text.erase_range(start..end);
                assert_eq!(text.capacity(), capacity);
                text
            }
            Op::Push(byte) => {
                model.push(byte);
                text.push(byte)
            }
            Op::Pop => {
                assert_eq!(text.try_pop().ok(), model.pop());
                text
            }
            Op::Put(index, byte) => {
                if !model.is_empty() {
                    let index = usize::from(index) % model.len();
                    assert_eq!(text.put(index, byte), model[index]);
                    model[index] = byte;
                }
                text
            }
            Op::OutOfRange(past, width) => {
                let len = model.len();
                let index = len + 1 + usize::from(past);
                let rejected = text.duplicate().try_insert_bytes(index, b"x");
                assert_eq!(rejected.unwrap_err(), TextError::OutOfRange { index, len });
                assert_eq!(text.try_get(len), Err(TextError::OutOfRange { index: len, len }));
                assert!(text.try_put(index, 0).is_err());

                let start = len.saturating_sub(usize::from(width));
                let end = len + 1 + usize::from(past);
                assert_eq!(
                    text.try_erase_range(start..end),
                    Err(TextError::InvalidRange { start, end, len })
                );
                text
            }
            Op::SetLength(len) => {
                let len = usize::from(len);
                if text.try_set_length(len).is_ok() {
                    // Growing the length exposes whatever the spare bytes hold.
                    model = text.as_bytes().to_vec();
                    assert_eq!(model.len(), len);
                } else {
                    assert!(len > text.capacity());
                }
                text
            }
            Op::Clear => {
                model.clear();
                text.clear();
                text
            }
            Op::Expand(capacity) => {
                let capacity = usize::from(capacity);
                let before = text.capacity();
                let text = text.expand_to_fit(capacity);
                assert!(text.capacity() >= before.max(capacity));
                text
            }
            Op::Shrink => {
                let text = text.shrink_to_fit();
                assert_eq!(text.capacity(), model.len());
                text
            }
            Op::Lower => {
                model.make_ascii_lowercase();
                text.lower();
                text
            }
            Op::Upper => {
                model.make_ascii_uppercase();
                text.upper();
                text
            }
            Op::Quote => {
                if model.len() > QUOTE_LIMIT {
                    continue;
                }
                let quoted = text.quote();
                quote_round_trips(&quoted, &model);
                model = quoted.as_bytes().to_vec();
                quoted
            }
        };
        check(&text, &model);
    }
}

fuzz_target!(|session: Session| run(session));

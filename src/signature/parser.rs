//! Recursive bracket-driven parser: type signature text → [`TypeNode`].
//!
//! The parser runs in two passes:
//! 1. **Scan**: a left-to-right tokenizer that recurses into every `<…>` and
//!    `(…)` list and returns the sibling segments of each argument together
//!    with how many characters the nested list consumed.
//! 2. **Build**: each argument's segments are classified by shape: one named
//!    token is a `Specific` or `Generic` node, the triple
//!    `(params) -> return` is a `Lambda`, anything else is rejected.
//!
//! The arrow `->` is recognised as a two-character marker while scanning, so
//! its `>` never closes a type-argument list.

use super::error::{SignatureError, SignatureResult};
use super::node::TypeNode;

/// Parse a type signature such as `Map<String, List<Int?>>?` or
/// `(name: Value?) -> Result`.
pub fn parse(signature: &str) -> SignatureResult<TypeNode> {
    let scanner = Scanner::new(signature);
    let (mut arguments, _) = scanner.scan_list(0, None)?;
    if arguments.len() != 1 {
        return Err(SignatureError::Unparseable {
            input: signature.to_string(),
            token_count: arguments.len(),
        });
    }
    let root = arguments.remove(0);
    scanner.build_argument(root)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    Angle,
    Paren,
}

/// One named token, optionally followed by a bracketed argument list.
#[derive(Debug)]
struct Item {
    name: String,
    is_nullable: bool,
    list: Option<(Bracket, Vec<Argument>)>,
}

#[derive(Debug)]
enum Segment {
    Item(Item),
    Arrow,
}

/// The segments between two commas at one nesting depth.
type Argument = Vec<Segment>;

struct Scanner<'a> {
    input: &'a str,
    chars: Vec<char>,
}

/// Words that may precede a type and carry no type information.
const MODIFIERS: [&str; 7] = ["suspend", "out", "in", "vararg", "noinline", "crossinline", "reified"];

fn is_modifier(word: &str) -> bool {
    MODIFIERS.contains(&word)
}

/// Name characters accumulated since the last delimiter.
#[derive(Default)]
struct PendingName {
    text: String,
    /// Whitespace followed a word. Only a modifier may be followed by
    /// another word (`out T` → `T`).
    word_break: bool,
}

impl PendingName {
    fn push(&mut self, c: char) {
        if self.word_break {
            self.text.clear();
            self.word_break = false;
        }
        self.text.push(c);
    }

    fn take(&mut self) -> String {
        self.word_break = false;
        std::mem::take(&mut self.text)
    }

    fn flush_into(&mut self, segments: &mut Argument) {
        if !self.text.is_empty() {
            segments.push(Segment::Item(Item {
                name: self.take(),
                is_nullable: false,
                list: None,
            }));
        }
    }
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
        }
    }

    /// Scan from `start` until `closer` (or end of input when `None`).
    ///
    /// Returns the comma-separated arguments and the number of characters
    /// consumed, including the closer itself.
    fn scan_list(&self, start: usize, closer: Option<char>) -> SignatureResult<(Vec<Argument>, usize)> {
        let mut arguments: Vec<Argument> = Vec::new();
        let mut current: Argument = Vec::new();
        let mut name = PendingName::default();
        let mut i = start;

        while i < self.chars.len() {
            let c = self.chars[i];
            match c {
                c if c.is_whitespace() => {
                    if !name.text.is_empty() {
                        name.word_break = true;
                    }
                    i += 1;
                }
                '<' => {
                    let generic_name = name.take();
                    if generic_name.is_empty() {
                        return Err(self.empty_name());
                    }
                    let (children, consumed) = self.scan_list(i + 1, Some('>'))?;
                    current.push(Segment::Item(Item {
                        name: generic_name,
                        is_nullable: false,
                        list: Some((Bracket::Angle, children)),
                    }));
                    i += 1 + consumed;
                }
                '(' => {
                    // Parentheses never carry a name; only a modifier such as
                    // `suspend` may precede them.
                    let prefix = name.take();
                    if !prefix.is_empty() && !is_modifier(&prefix) {
                        return Err(self.unexpected(i, c));
                    }
                    let (children, consumed) = self.scan_list(i + 1, Some(')'))?;
                    current.push(Segment::Item(Item {
                        name: String::new(),
                        is_nullable: false,
                        list: Some((Bracket::Paren, children)),
                    }));
                    i += 1 + consumed;
                }
                '-' if self.chars.get(i + 1) == Some(&'>') => {
                    name.flush_into(&mut current);
                    current.push(Segment::Arrow);
                    i += 2;
                }
                ',' => {
                    name.flush_into(&mut current);
                    arguments.push(std::mem::take(&mut current));
                    i += 1;
                }
                '>' | ')' => {
                    if closer != Some(c) {
                        return Err(self.unbalanced(i));
                    }
                    name.flush_into(&mut current);
                    if !(current.is_empty() && arguments.is_empty()) {
                        arguments.push(current);
                    }
                    return Ok((arguments, i + 1 - start));
                }
                '?' => {
                    name.flush_into(&mut current);
                    match current.last_mut() {
                        Some(Segment::Item(item)) => item.is_nullable = true,
                        _ => return Err(self.unexpected(i, c)),
                    }
                    i += 1;
                }
                // Parameter label: `name: Type` keeps only `Type`.
                ':' => {
                    name.take();
                    i += 1;
                }
                _ => {
                    if name.word_break && !is_modifier(&name.text) {
                        return Err(self.unparseable(2));
                    }
                    name.push(c);
                    i += 1;
                }
            }
        }

        if closer.is_some() {
            return Err(self.unbalanced(self.chars.len()));
        }
        name.flush_into(&mut current);
        arguments.push(current);
        Ok((arguments, self.chars.len() - start))
    }

    /// Classify the segments of one argument into a node.
    fn build_argument(&self, mut segments: Argument) -> SignatureResult<TypeNode> {
        match segments.len() {
            0 => Err(self.empty_name()),
            1 => match segments.remove(0) {
                Segment::Item(item) => self.build_item(item),
                Segment::Arrow => Err(self.unparseable(1)),
            },
            3 => {
                let mut parts = segments.into_iter();
                match (parts.next(), parts.next(), parts.next()) {
                    (
                        Some(Segment::Item(Item {
                            list: Some((Bracket::Paren, parameters)),
                            ..
                        })),
                        Some(Segment::Arrow),
                        Some(Segment::Item(return_item)),
                    ) => {
                        let parameter_types = parameters
                            .into_iter()
                            .map(|parameter| self.build_argument(parameter))
                            .collect::<SignatureResult<Vec<_>>>()?;
                        let return_type = self.build_item(return_item)?;
                        Ok(TypeNode::Lambda {
                            return_type: Box::new(return_type),
                            parameter_types,
                        })
                    }
                    _ => Err(self.unparseable(3)),
                }
            }
            n => Err(self.unparseable(n)),
        }
    }

    fn build_item(&self, item: Item) -> SignatureResult<TypeNode> {
        let Item {
            name,
            is_nullable,
            list,
        } = item;
        match list {
            None => {
                if name.is_empty() {
                    return Err(self.empty_name());
                }
                Ok(TypeNode::Specific { name, is_nullable })
            }
            Some((Bracket::Angle, arguments)) => {
                if name.is_empty() || arguments.is_empty() {
                    return Err(self.empty_name());
                }
                let type_arguments = arguments
                    .into_iter()
                    .map(|argument| self.build_argument(argument))
                    .collect::<SignatureResult<Vec<_>>>()?;
                Ok(TypeNode::Generic {
                    name,
                    is_nullable,
                    type_arguments,
                })
            }
            // A parenthesized single type not followed by `->` only groups.
            Some((Bracket::Paren, mut arguments)) => {
                if arguments.len() != 1 {
                    return Err(self.unparseable(arguments.len()));
                }
                let inner = self.build_argument(arguments.remove(0))?;
                Ok(if is_nullable { inner.into_nullable() } else { inner })
            }
        }
    }

    fn empty_name(&self) -> SignatureError {
        SignatureError::EmptyName {
            input: self.input.to_string(),
        }
    }

    fn unbalanced(&self, position: usize) -> SignatureError {
        SignatureError::Unbalanced {
            input: self.input.to_string(),
            position,
        }
    }

    fn unexpected(&self, position: usize, character: char) -> SignatureError {
        SignatureError::UnexpectedCharacter {
            input: self.input.to_string(),
            position,
            character,
        }
    }

    fn unparseable(&self, token_count: usize) -> SignatureError {
        SignatureError::Unparseable {
            input: self.input.to_string(),
            token_count,
        }
    }
}

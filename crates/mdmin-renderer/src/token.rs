//! Forward-only HTML token stream.
//!
//! The rewriter only needs a flat sequence of tags and text, never a tree.
//! [`HtmlTokenizer`] produces that sequence from `quick-xml` events; any other
//! [`TokenSource`] can stand in for it.

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::resolve_entity;
use crate::error::RewriteError;

/// Attribute as written in the source: raw value, no unescaping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One structural unit of the HTML stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// `<name attrs>`
    Start { name: String, attrs: Vec<Attribute> },
    /// `<name attrs />`
    Empty { name: String, attrs: Vec<Attribute> },
    /// `</name>`
    End { name: String },
    /// Character data with entities already resolved.
    Text(String),
    /// Content of `<?...?>`.
    ProcessingInstruction(String),
    /// Content of `<!...>`, e.g. `DOCTYPE html`.
    Directive(String),
    /// Content of `<!--...-->`.
    Comment(String),
    /// Token kind with no serialization rule; carries a description.
    Unrecognized(String),
    /// End of input.
    Eof,
}

/// Source of [`Token`]s, read left to right.
pub trait TokenSource {
    /// Next token; [`Token::Eof`] once the input is exhausted.
    fn next_token(&mut self) -> Result<Token, RewriteError>;
}

/// Lenient HTML tokenizer on top of `quick-xml`.
pub struct HtmlTokenizer<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<'a> HtmlTokenizer<&'a [u8]> {
    /// Tokenize an in-memory HTML fragment.
    #[must_use]
    pub fn from_bytes(html: &'a [u8]) -> Self {
        Self::new(html)
    }
}

impl<R: BufRead> HtmlTokenizer<R> {
    #[must_use]
    pub fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        let config = reader.config_mut();
        config.trim_text(false);
        // End tags are not matched against start tags, so unclosed void
        // elements such as `<br>` pass through.
        config.check_end_names = false;
        // A bare `&` is text, not a truncated reference.
        config.allow_dangling_amp = true;
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, RewriteError> {
        Ok(self.reader.decoder().decode(bytes)?.into_owned())
    }

    fn decode_element(&self, e: &BytesStart) -> Result<(String, Vec<Attribute>), RewriteError> {
        let name = self.decode(e.name().as_ref())?;
        let mut attrs = Vec::new();
        for attr in e.html_attributes() {
            let attr = attr?;
            attrs.push(Attribute {
                name: self.decode(attr.key.as_ref())?,
                value: self.decode(&attr.value)?,
            });
        }
        Ok((name, attrs))
    }
}

impl<R: BufRead> TokenSource for HtmlTokenizer<R> {
    fn next_token(&mut self) -> Result<Token, RewriteError> {
        self.buf.clear();
        let event = self.reader.read_event_into(&mut self.buf)?.into_owned();
        let token = match event {
            Event::Start(e) => {
                let (name, attrs) = self.decode_element(&e)?;
                Token::Start { name, attrs }
            }
            Event::Empty(e) => {
                let (name, attrs) = self.decode_element(&e)?;
                Token::Empty { name, attrs }
            }
            Event::End(e) => Token::End {
                name: self.decode(e.name().as_ref())?,
            },
            Event::Text(e) => Token::Text(self.decode(&e)?),
            Event::CData(e) => Token::Text(std::str::from_utf8(&e)?.to_owned()),
            Event::GeneralRef(e) => {
                let entity = self.decode(&e)?;
                Token::Text(resolve_entity(&entity).map(Cow::into_owned)?)
            }
            Event::PI(e) => Token::ProcessingInstruction(self.decode(&e)?),
            Event::Decl(e) => Token::ProcessingInstruction(self.decode(&e)?),
            Event::DocType(e) => Token::Directive(format!("DOCTYPE {}", self.decode(&e)?.trim_start())),
            Event::Comment(e) => Token::Comment(self.decode(&e)?),
            Event::Eof => Token::Eof,
        };
        Ok(token)
    }
}

/// Replays a fixed list of tokens, then [`Token::Eof`].
impl TokenSource for std::vec::IntoIter<Token> {
    fn next_token(&mut self) -> Result<Token, RewriteError> {
        Ok(self.next().unwrap_or(Token::Eof))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tokens(html: &str) -> Vec<Token> {
        let mut tokenizer = HtmlTokenizer::from_bytes(html.as_bytes());
        let mut out = Vec::new();
        loop {
            match tokenizer.next_token().unwrap() {
                Token::Eof => return out,
                token => out.push(token),
            }
        }
    }

    fn start(name: &str) -> Token {
        Token::Start {
            name: name.to_owned(),
            attrs: vec![],
        }
    }

    fn end(name: &str) -> Token {
        Token::End {
            name: name.to_owned(),
        }
    }

    #[test]
    fn test_tokenize_simple_element() {
        assert_eq!(
            tokens("<p>Hello</p>"),
            vec![start("p"), Token::Text("Hello".to_owned()), end("p")]
        );
    }

    #[test]
    fn test_tokenize_attributes_raw() {
        let toks = tokens(r#"<a href="x?a=1&amp;b=2" title="t">l</a>"#);
        assert_eq!(
            toks[0],
            Token::Start {
                name: "a".to_owned(),
                attrs: vec![
                    Attribute::new("href", "x?a=1&amp;b=2"),
                    Attribute::new("title", "t"),
                ],
            }
        );
    }

    #[test]
    fn test_tokenize_entities_as_text() {
        let text: String = tokens("<p>a &lt; b &amp; c</p>")
            .into_iter()
            .filter_map(|t| match t {
                Token::Text(s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(text, "a < b & c");
    }

    #[test]
    fn test_tokenize_self_closing() {
        assert_eq!(
            tokens("<hr />"),
            vec![Token::Empty {
                name: "hr".to_owned(),
                attrs: vec![],
            }]
        );
    }

    #[test]
    fn test_tokenize_comment_pi_doctype() {
        assert_eq!(
            tokens("<!DOCTYPE html><?php echo 1 ?><!-- note -->"),
            vec![
                Token::Directive("DOCTYPE html".to_owned()),
                Token::ProcessingInstruction("php echo 1 ".to_owned()),
                Token::Comment(" note ".to_owned()),
            ]
        );
    }

    #[test]
    fn test_tokenize_cdata_as_text() {
        assert_eq!(
            tokens("<p><![CDATA[a<b]]></p>"),
            vec![start("p"), Token::Text("a<b".to_owned()), end("p")]
        );
    }

    #[test]
    fn test_tokenize_unclosed_void_element() {
        assert_eq!(
            tokens("<p>a<br>b</p>"),
            vec![
                start("p"),
                Token::Text("a".to_owned()),
                start("br"),
                Token::Text("b".to_owned()),
                end("p"),
            ]
        );
    }

    #[test]
    fn test_tokenize_mismatched_end_passes_through() {
        assert_eq!(
            tokens("<p>text</div>"),
            vec![start("p"), Token::Text("text".to_owned()), end("div")]
        );
    }

    #[test]
    fn test_tokenize_bare_ampersand_is_text() {
        let text: String = tokens("<p>A & B</p>")
            .into_iter()
            .filter_map(|t| match t {
                Token::Text(s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(text, "A & B");
    }

    #[test]
    fn test_tokenize_truncated_tag_is_error() {
        let mut tokenizer = HtmlTokenizer::from_bytes(b"<p>text</p");
        let result = (0..4).try_for_each(|_| tokenizer.next_token().map(drop));
        assert!(result.is_err());
    }

    #[test]
    fn test_tokenize_bad_char_ref_is_error() {
        let mut tokenizer = HtmlTokenizer::from_bytes(b"<p>&#xZZ;</p>");
        tokenizer.next_token().unwrap();
        assert!(tokenizer.next_token().is_err());
    }

    #[test]
    fn test_vec_source_ends_with_eof() {
        let mut source = vec![Token::Text("x".to_owned())].into_iter();
        assert_eq!(source.next_token().unwrap(), Token::Text("x".to_owned()));
        assert_eq!(source.next_token().unwrap(), Token::Eof);
        assert_eq!(source.next_token().unwrap(), Token::Eof);
    }
}

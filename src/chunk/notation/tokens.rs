//! Token definitions for the rule notation
//!
//! The tokens are defined using the logos derive macro. A whole tag class such
//! as `<JJ.*>` or `<NP|PP>` is a single token; its body is interpreted by the
//! parser. Outside angle brackets only labels, punctuation and quantifiers
//! appear. `#` starts a comment running to the end of the line.

use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(skip r"[ \t\r\n]+")]
pub enum NotationToken {
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,

    // Tag class body, without the angle brackets; `\` escapes one character
    #[regex(r"<([^<>\\\n]|\\.)*>", |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    })]
    TagClass(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*", |lex| lex.slice().to_string())]
    Label(String),

    #[token(":")]
    Colon,

    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    // `{m}`, `{m,}` or `{m,n}`; longer than `{` so it wins when digits follow
    #[regex(r"\{[0-9]+(,[0-9]*)?\}", parse_bounds)]
    Bounds((u32, Option<u32>)),

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("|")]
    Pipe,

    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
}

fn parse_bounds(lex: &mut logos::Lexer<NotationToken>) -> Option<(u32, Option<u32>)> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    match inner.split_once(',') {
        None => {
            let count = inner.parse().ok()?;
            Some((count, Some(count)))
        }
        Some((min, "")) => Some((min.parse().ok()?, None)),
        Some((min, max)) => Some((min.parse().ok()?, Some(max.parse().ok()?))),
    }
}

impl fmt::Display for NotationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationToken::Comment => write!(f, "comment"),
            NotationToken::TagClass(body) => write!(f, "<{}>", body),
            NotationToken::Label(label) => write!(f, "label '{}'", label),
            NotationToken::Colon => write!(f, "':'"),
            NotationToken::OpenBrace => write!(f, "'{{'"),
            NotationToken::CloseBrace => write!(f, "'}}'"),
            NotationToken::Bounds((min, None)) => write!(f, "'{{{},}}'", min),
            NotationToken::Bounds((min, Some(max))) => write!(f, "'{{{},{}}}'", min, max),
            NotationToken::OpenParen => write!(f, "'('"),
            NotationToken::CloseParen => write!(f, "')'"),
            NotationToken::Pipe => write!(f, "'|'"),
            NotationToken::Question => write!(f, "'?'"),
            NotationToken::Star => write!(f, "'*'"),
            NotationToken::Plus => write!(f, "'+'"),
        }
    }
}

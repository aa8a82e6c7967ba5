use std::fmt::Display;
use std::rc::Rc;

/// A single input unit: the uri it was given under and its full text.
#[derive(Debug, PartialEq)]
pub struct Source {
    pub uri: String,
    pub text: String,
}
impl Source {
    pub fn new(uri: &str, text: &str) -> Rc<Source> {
        Rc::new(Source {
            uri: uri.to_string(),
            text: text.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Punctuation.
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Semicolon,
    Hash,
    Dollar,
    Equal,
    FatArrow,
    Question,
    Colon,

    // Operators.
    Plus,
    Minus,
    Star,
    Slash,
    Mod,
    PlusPlus,
    MinusMinus,
    HashLess,
    HashLessEqual,
    HashGreater,
    HashGreaterEqual,
    HashPlus,
    HashMinus,
    HashStar,
    HashSlash,
    HashMod,
    EqualEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Bang,
    AmpAmp,
    PipePipe,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    ModEqual,

    // Literals. Numbers keep their matched text verbatim so that
    // they can be spliced into the output unchanged.
    Name(String),
    Number(String),
    Str(String),

    // Keywords.
    Package,
    Import,
    Class,
    Extends,
    Def,
    Async,
    Await,
    Is,
    // `is not` is never produced by the lexer; the parser fuses the
    // two-token spelling into this kind.
    IsNot,
    Not,
    New,
    True,
    False,
    Null,
    Or,
    And,
    For,
    If,
    Else,
    While,
    Break,
    Continue,
    Return,
    Var,
    Let,
    Const,

    Eof,
}
impl TokenKind {
    // Representative values for discriminant-based matching in the parser.
    pub const NAME: TokenKind = TokenKind::Name(String::new());
    pub const NUMBER: TokenKind = TokenKind::Number(String::new());
    pub const STR: TokenKind = TokenKind::Str(String::new());
}
impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TokenKind::LeftParen => "'('",
                TokenKind::RightParen => "')'",
                TokenKind::LeftBracket => "'['",
                TokenKind::RightBracket => "']'",
                TokenKind::LeftBrace => "'{'",
                TokenKind::RightBrace => "'}'",
                TokenKind::Comma => "','",
                TokenKind::Dot => "'.'",
                TokenKind::Semicolon => "';'",
                TokenKind::Hash => "'#'",
                TokenKind::Dollar => "'$'",
                TokenKind::Equal => "'='",
                TokenKind::FatArrow => "'=>'",
                TokenKind::Question => "'?'",
                TokenKind::Colon => "':'",
                TokenKind::Plus => "'+'",
                TokenKind::Minus => "'-'",
                TokenKind::Star => "'*'",
                TokenKind::Slash => "'/'",
                TokenKind::Mod => "'%'",
                TokenKind::PlusPlus => "'++'",
                TokenKind::MinusMinus => "'--'",
                TokenKind::HashLess => "'#<'",
                TokenKind::HashLessEqual => "'#<='",
                TokenKind::HashGreater => "'#>'",
                TokenKind::HashGreaterEqual => "'#>='",
                TokenKind::HashPlus => "'#+'",
                TokenKind::HashMinus => "'#-'",
                TokenKind::HashStar => "'#*'",
                TokenKind::HashSlash => "'#/'",
                TokenKind::HashMod => "'#%'",
                TokenKind::EqualEqual => "'=='",
                TokenKind::BangEqual => "'!='",
                TokenKind::Less => "'<'",
                TokenKind::LessEqual => "'<='",
                TokenKind::Greater => "'>'",
                TokenKind::GreaterEqual => "'>='",
                TokenKind::Bang => "'!'",
                TokenKind::AmpAmp => "'&&'",
                TokenKind::PipePipe => "'||'",
                TokenKind::PlusEqual => "'+='",
                TokenKind::MinusEqual => "'-='",
                TokenKind::StarEqual => "'*='",
                TokenKind::SlashEqual => "'/='",
                TokenKind::ModEqual => "'%='",
                TokenKind::Name(..) => "identifier",
                TokenKind::Number(..) => "number",
                TokenKind::Str(..) => "string",
                TokenKind::Package => "'package'",
                TokenKind::Import => "'import'",
                TokenKind::Class => "'class'",
                TokenKind::Extends => "'extends'",
                TokenKind::Def => "'def'",
                TokenKind::Async => "'async'",
                TokenKind::Await => "'await'",
                TokenKind::Is => "'is'",
                TokenKind::IsNot => "'is not'",
                TokenKind::Not => "'not'",
                TokenKind::New => "'new'",
                TokenKind::True => "'true'",
                TokenKind::False => "'false'",
                TokenKind::Null => "'null'",
                TokenKind::Or => "'or'",
                TokenKind::And => "'and'",
                TokenKind::For => "'for'",
                TokenKind::If => "'if'",
                TokenKind::Else => "'else'",
                TokenKind::While => "'while'",
                TokenKind::Break => "'break'",
                TokenKind::Continue => "'continue'",
                TokenKind::Return => "'return'",
                TokenKind::Var => "'var'",
                TokenKind::Let => "'let'",
                TokenKind::Const => "'const'",
                TokenKind::Eof => "end of file",
            }
        )
    }
}

/// A token with its position given as a byte offset into its source.
/// Line, column and line-text are derived on demand so the lexer never
/// has to track them.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub source: Rc<Source>,
    pub pos: usize,
    // Dotted path of enclosing function names. The lexer always leaves
    // this empty; the parser fills it in on the clone it hands out when
    // the token is consumed, so it can never be set twice.
    context: Option<Rc<str>>,
}
impl Token {
    pub fn new(kind: TokenKind, source: Rc<Source>, pos: usize) -> Self {
        Token {
            kind,
            source,
            pos,
            context: None,
        }
    }
    /// Dummy token for constructing expected values in unit-tests.
    pub fn default(kind: TokenKind) -> Self {
        Token {
            kind,
            source: Source::new("", ""),
            pos: 0,
            context: None,
        }
    }
    pub fn with_context(mut self, context: Rc<str>) -> Self {
        self.context = Some(context);
        self
    }
    pub fn context_name(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn line_index(&self) -> usize {
        let text = &self.source.text;
        1 + text[..self.pos.min(text.len())]
            .bytes()
            .filter(|b| *b == b'\n')
            .count()
    }
    pub fn column(&self) -> usize {
        let text = &self.source.text;
        let pos = self.pos.min(text.len());
        pos - text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0) + 1
    }
    pub fn line_string(&self) -> &str {
        let text = &self.source.text;
        let pos = self.pos.min(text.len());
        let start = text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let end = text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len());
        &text[start..end]
    }

    pub fn unwrap_string(&self) -> String {
        match &self.kind {
            TokenKind::Name(s) | TokenKind::Number(s) | TokenKind::Str(s) => s.clone(),
            _ => panic!("cant unwrap string on {} token", self.kind),
        }
    }
}
// Location and context are bookkeeping; two tokens are the same token
// if they have the same kind at the same spot of the same unit.
impl PartialEq for Token {
    fn eq(&self, other: &Token) -> bool {
        self.kind == other.kind && self.pos == other.pos && self.source.uri == other.source.uri
    }
}
impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TokenKind::Name(s) | TokenKind::Number(s) => write!(f, "Token({}, {})", self.kind, s),
            TokenKind::Str(s) => write!(f, "Token(string, {:?})", s),
            kind => write!(f, "Token({})", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_at(text: &str, pos: usize) -> Token {
        Token::new(TokenKind::Eof, Source::new("<test>", text), pos)
    }

    #[test]
    fn line_and_column_from_byte_offset() {
        let token = token_at("ab\ncde\nf", 4);
        assert_eq!(token.line_index(), 2);
        assert_eq!(token.column(), 2);
        assert_eq!(token.line_string(), "cde");
    }
    #[test]
    fn location_on_first_line() {
        let token = token_at("hello", 3);
        assert_eq!(token.line_index(), 1);
        assert_eq!(token.column(), 4);
        assert_eq!(token.line_string(), "hello");
    }
    #[test]
    fn location_at_end_of_input() {
        let token = token_at("a\nb", 3);
        assert_eq!(token.line_index(), 2);
        assert_eq!(token.column(), 2);
        assert_eq!(token.line_string(), "b");
    }
    #[test]
    fn context_set_once_on_consumed_clone() {
        let token = token_at("x", 0);
        assert_eq!(token.context_name(), None);

        let stamped = token.clone().with_context(".main".into());
        assert_eq!(stamped.context_name(), Some(".main"));
        // the original buffer token is untouched
        assert_eq!(token.context_name(), None);
    }
}

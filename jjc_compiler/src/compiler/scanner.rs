//! Turns the text of a single input unit into [Tokens](Token)

use crate::compiler::common::error::{Error, ErrorKind};
use crate::compiler::common::token::{Source, Token, TokenKind};
use std::collections::HashMap;
use std::rc::Rc;

// Matched in order, so longer spellings have to come before their
// prefixes ('#<=' before '#<' before '#').
const SYMBOLS: &[(&str, TokenKind)] = &[
    ("#<=", TokenKind::HashLessEqual),
    ("#>=", TokenKind::HashGreaterEqual),
    ("#<", TokenKind::HashLess),
    ("#>", TokenKind::HashGreater),
    ("#+", TokenKind::HashPlus),
    ("#-", TokenKind::HashMinus),
    ("#*", TokenKind::HashStar),
    ("#/", TokenKind::HashSlash),
    ("#%", TokenKind::HashMod),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
    ("==", TokenKind::EqualEqual),
    ("!=", TokenKind::BangEqual),
    ("<=", TokenKind::LessEqual),
    (">=", TokenKind::GreaterEqual),
    ("&&", TokenKind::AmpAmp),
    ("||", TokenKind::PipePipe),
    ("+=", TokenKind::PlusEqual),
    ("-=", TokenKind::MinusEqual),
    ("*=", TokenKind::StarEqual),
    ("/=", TokenKind::SlashEqual),
    ("%=", TokenKind::ModEqual),
    ("=>", TokenKind::FatArrow),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("[", TokenKind::LeftBracket),
    ("]", TokenKind::RightBracket),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    (";", TokenKind::Semicolon),
    ("#", TokenKind::Hash),
    ("$", TokenKind::Dollar),
    ("=", TokenKind::Equal),
    ("?", TokenKind::Question),
    (":", TokenKind::Colon),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Mod),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("!", TokenKind::Bang),
];

pub struct Scanner {
    source: Rc<Source>,
    pos: usize,
    keywords: HashMap<&'static str, TokenKind>,
}
impl Scanner {
    pub fn new(source: Rc<Source>) -> Self {
        Scanner {
            source,
            pos: 0,
            keywords: HashMap::from([
                ("package", TokenKind::Package),
                ("import", TokenKind::Import),
                ("class", TokenKind::Class),
                ("extends", TokenKind::Extends),
                ("def", TokenKind::Def),
                ("async", TokenKind::Async),
                ("await", TokenKind::Await),
                ("is", TokenKind::Is),
                ("not", TokenKind::Not),
                ("new", TokenKind::New),
                ("true", TokenKind::True),
                ("false", TokenKind::False),
                ("null", TokenKind::Null),
                ("or", TokenKind::Or),
                ("and", TokenKind::And),
                ("for", TokenKind::For),
                ("if", TokenKind::If),
                ("else", TokenKind::Else),
                ("while", TokenKind::While),
                ("break", TokenKind::Break),
                ("continue", TokenKind::Continue),
                ("return", TokenKind::Return),
                ("var", TokenKind::Var),
                ("let", TokenKind::Let),
                ("const", TokenKind::Const),
            ]),
        }
    }

    pub fn scan(mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();
        loop {
            self.skip_ignored()?;
            let start = self.pos;
            let c = match self.peek_char() {
                Some(c) => c,
                None => break,
            };
            let token = if c == '\'' || c == '"' || self.at_raw_string() {
                self.string(start)?
            } else if c.is_ascii_digit() || (c == '.' && self.digit_at(self.pos + 1)) {
                self.number(start)
            } else if c.is_ascii_alphabetic() || c == '_' {
                self.name(start)
            } else {
                self.symbol(start)?
            };
            tokens.push(token);
        }
        tokens.push(self.token_at(TokenKind::Eof, self.source.text.len()));
        Ok(tokens)
    }

    fn peek_char(&self) -> Option<char> {
        self.source.text[self.pos..].chars().next()
    }
    fn rest(&self) -> &str {
        &self.source.text[self.pos..]
    }
    fn digit_at(&self, pos: usize) -> bool {
        self.source
            .text
            .as_bytes()
            .get(pos)
            .map_or(false, u8::is_ascii_digit)
    }
    fn at_raw_string(&self) -> bool {
        self.rest().starts_with("r'") || self.rest().starts_with("r\"")
    }
    fn token_at(&self, kind: TokenKind, pos: usize) -> Token {
        Token::new(kind, Rc::clone(&self.source), pos)
    }

    fn skip_ignored(&mut self) -> Result<(), Error> {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => self.pos += c.len_utf8(),
                Some('/') if self.rest().starts_with("//") => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.pos += c.len_utf8();
                    }
                }
                Some('/') if self.rest().starts_with("/*") => {
                    let start = self.pos;
                    match self.rest()[2..].find("*/") {
                        Some(end) => self.pos += 2 + end + 2,
                        None => {
                            let token = self.token_at(TokenKind::Eof, start);
                            return Err(Error::new(&token, ErrorKind::UnterminatedComment));
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    // An unterminated string is not an error; its value simply runs to
    // the end of the input.
    fn string(&mut self, start: usize) -> Result<Token, Error> {
        let raw = self.at_raw_string();
        if raw {
            self.pos += 1;
        }
        let quote_char = self.peek_char().unwrap();
        let quote = if self.rest().starts_with(&quote_char.to_string().repeat(3)) {
            quote_char.to_string().repeat(3)
        } else {
            quote_char.to_string()
        };
        self.pos += quote.len();

        let mut value = String::new();
        while self.pos < self.source.text.len() {
            if self.rest().starts_with(&quote) {
                self.pos += quote.len();
                break;
            }
            let c = self.peek_char().unwrap();
            if !raw && c == '\\' {
                let escaped = self.source.text[self.pos + 1..].chars().next();
                value.push(match escaped {
                    Some('t') => '\t',
                    Some('n') => '\n',
                    Some('\\') => '\\',
                    Some('\'') => '\'',
                    Some('"') => '"',
                    other => {
                        let token = self.token_at(TokenKind::Eof, self.pos);
                        return Err(Error::new(
                            &token,
                            ErrorKind::UnknownEscape(other.unwrap_or('\\')),
                        ));
                    }
                });
                self.pos += 1 + escaped.map(char::len_utf8).unwrap_or(0);
            } else {
                value.push(c);
                self.pos += c.len_utf8();
            }
        }
        Ok(self.token_at(TokenKind::Str(value), start))
    }

    // Numbers are kept as their matched text so they can be emitted
    // verbatim. Both '5.' and '.5' match, a lone '.' does not.
    fn number(&mut self, start: usize) -> Token {
        let bytes = self.source.text.as_bytes();
        let mut seen_dot = false;
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b if b.is_ascii_digit() => self.pos += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        let value = self.source.text[start..self.pos].to_string();
        self.token_at(TokenKind::Number(value), start)
    }

    fn name(&mut self, start: usize) -> Token {
        let bytes = self.source.text.as_bytes();
        while self.pos < bytes.len()
            && (bytes[self.pos].is_ascii_alphanumeric() || bytes[self.pos] == b'_')
        {
            self.pos += 1;
        }
        let value = &self.source.text[start..self.pos];
        let kind = match self.keywords.get(value) {
            Some(kind) => kind.clone(),
            None => TokenKind::Name(value.to_string()),
        };
        self.token_at(kind, start)
    }

    fn symbol(&mut self, start: usize) -> Result<Token, Error> {
        for (spelling, kind) in SYMBOLS {
            if self.rest().starts_with(spelling) {
                self.pos += spelling.len();
                return Ok(self.token_at(kind.clone(), start));
            }
        }
        let token = self.token_at(TokenKind::Eof, start);
        Err(Error::new(&token, ErrorKind::UnrecognizedToken))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(input: &str) -> Vec<TokenKind> {
        Scanner::new(Source::new("<test>", input))
            .scan()
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }
    fn setup_err(input: &str) -> ErrorKind {
        Scanner::new(Source::new("<test>", input))
            .scan()
            .unwrap_err()
            .kind
    }

    #[test]
    fn names_keywords_numbers_strings_operators() {
        let actual = setup("aa Bb class 1 2.4 'hi' ++");
        let expected = vec![
            TokenKind::Name("aa".to_string()),
            TokenKind::Name("Bb".to_string()),
            TokenKind::Class,
            TokenKind::Number("1".to_string()),
            TokenKind::Number("2.4".to_string()),
            TokenKind::Str("hi".to_string()),
            TokenKind::PlusPlus,
            TokenKind::Eof,
        ];

        assert_eq!(actual, expected);
    }
    #[test]
    fn longest_symbol_wins() {
        let actual = setup("#<= #< <= < => == =");
        let expected = vec![
            TokenKind::HashLessEqual,
            TokenKind::HashLess,
            TokenKind::LessEqual,
            TokenKind::Less,
            TokenKind::FatArrow,
            TokenKind::EqualEqual,
            TokenKind::Equal,
            TokenKind::Eof,
        ];

        assert_eq!(actual, expected);
    }
    #[test]
    fn number_forms() {
        let actual = setup(".5 5. 5.5 .");
        let expected = vec![
            TokenKind::Number(".5".to_string()),
            TokenKind::Number("5.".to_string()),
            TokenKind::Number("5.5".to_string()),
            TokenKind::Dot,
            TokenKind::Eof,
        ];

        assert_eq!(actual, expected);
    }
    #[test]
    fn string_escapes() {
        let actual = setup(r#"'a\tb\n\\ \''"#);
        let expected = vec![
            TokenKind::Str("a\tb\n\\ '".to_string()),
            TokenKind::Eof,
        ];

        assert_eq!(actual, expected);
    }
    #[test]
    fn raw_string_keeps_backslashes() {
        let actual = setup(r#"r'a\tb'"#);
        let expected = vec![TokenKind::Str("a\\tb".to_string()), TokenKind::Eof];

        assert_eq!(actual, expected);
    }
    #[test]
    fn triple_quoted_string_contains_single_quotes() {
        let actual = setup("'''it's fine''' \"\"\"a\nb\"\"\"");
        let expected = vec![
            TokenKind::Str("it's fine".to_string()),
            TokenKind::Str("a\nb".to_string()),
            TokenKind::Eof,
        ];

        assert_eq!(actual, expected);
    }
    #[test]
    fn unterminated_string_runs_to_end_of_input() {
        let actual = setup("'abc");
        let expected = vec![TokenKind::Str("abc".to_string()), TokenKind::Eof];

        assert_eq!(actual, expected);
    }
    #[test]
    fn name_with_keyword_prefix_is_a_name() {
        let actual = setup("isnot is not notx");
        let expected = vec![
            TokenKind::Name("isnot".to_string()),
            TokenKind::Is,
            TokenKind::Not,
            TokenKind::Name("notx".to_string()),
            TokenKind::Eof,
        ];

        assert_eq!(actual, expected);
    }
    #[test]
    fn comments_are_skipped() {
        let actual = setup("a // rest of line\nb /* c\nd */ e");
        let expected = vec![
            TokenKind::Name("a".to_string()),
            TokenKind::Name("b".to_string()),
            TokenKind::Name("e".to_string()),
            TokenKind::Eof,
        ];

        assert_eq!(actual, expected);
    }
    #[test]
    fn unknown_escape_err() {
        assert_eq!(setup_err(r#"'\q'"#), ErrorKind::UnknownEscape('q'));
    }
    #[test]
    fn unterminated_comment_err() {
        assert_eq!(setup_err("a /* b"), ErrorKind::UnterminatedComment);
    }
    #[test]
    fn unrecognized_token_err() {
        assert_eq!(setup_err("a @ b"), ErrorKind::UnrecognizedToken);
    }
    #[test]
    fn token_positions_are_byte_offsets() {
        let tokens = Scanner::new(Source::new("<test>", "ab\n  cd"))
            .scan()
            .unwrap();

        assert_eq!(tokens[0].pos, 0);
        assert_eq!(tokens[1].pos, 5);
        assert_eq!(tokens[1].line_index(), 2);
        assert_eq!(tokens[1].column(), 3);
    }
}

use crate::compiler::common::token::Token;

/// Immutable token buffer with a cursor. Peeking past the end keeps
/// returning the trailing EOF token, so lookahead never runs out.
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}
impl TokenStream {
    // The scanner guarantees a trailing EOF token.
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, pos: 0 }
    }
    pub fn peek(&self) -> &Token {
        self.peek_at(0)
    }
    pub fn peek_at(&self, offset: usize) -> &Token {
        let pos = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[pos]
    }
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        self.pos = (self.pos + 1).min(self.tokens.len());
        token
    }
    pub fn checkpoint(&self) -> usize {
        self.pos
    }
    pub fn rewind(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::common::token::{Source, TokenKind};

    fn setup(kinds: Vec<TokenKind>) -> TokenStream {
        let source = Source::new("<test>", "");
        let tokens = kinds
            .into_iter()
            .chain(std::iter::once(TokenKind::Eof))
            .enumerate()
            .map(|(pos, kind)| Token::new(kind, std::rc::Rc::clone(&source), pos))
            .collect();
        TokenStream::new(tokens)
    }

    #[test]
    fn peek_past_end_returns_eof() {
        let stream = setup(vec![TokenKind::Plus]);

        assert_eq!(stream.peek().kind, TokenKind::Plus);
        assert_eq!(stream.peek_at(1).kind, TokenKind::Eof);
        assert_eq!(stream.peek_at(100).kind, TokenKind::Eof);
    }
    #[test]
    fn advance_past_end_keeps_returning_eof() {
        let mut stream = setup(vec![TokenKind::Plus]);

        assert_eq!(stream.advance().kind, TokenKind::Plus);
        assert_eq!(stream.advance().kind, TokenKind::Eof);
        assert_eq!(stream.advance().kind, TokenKind::Eof);
    }
    #[test]
    fn rewind_restores_cursor() {
        let mut stream = setup(vec![TokenKind::Plus, TokenKind::Minus, TokenKind::Star]);
        let checkpoint = stream.checkpoint();

        stream.advance();
        stream.advance();
        assert_eq!(stream.peek().kind, TokenKind::Star);

        stream.rewind(checkpoint);
        assert_eq!(stream.peek().kind, TokenKind::Plus);
    }
}

use crate::error_handling::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    identifier, number, operator, punctuation
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub content: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(content: impl Into<String>, kind: TokenKind) -> Self {
        Self{content: content.into(), kind}
    }
}

pub trait Scanner {
    fn get_current(&self) -> Option<&Token>;
    fn advance(&mut self) -> Result<()>;
    fn is_valid(&self) -> bool {
        self.get_current().is_some()
    }
}

/// Replays tokens that were produced elsewhere.
pub struct SimpleScanner {
    tokens: Vec<Token>,
    index: usize,
}

impl SimpleScanner {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self{tokens, index: 0}
    }
}

impl Scanner for SimpleScanner {
    fn get_current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) -> Result<()> {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        Ok(())
    }
}

pub struct StringScanner {
    string: String,
    token: Option<Token>,
    index: usize,
}

fn is_operator(character: char) -> bool {
    matches!(character, '+' | '-' | '*' | '/' | '%' | '^' | '&' | '|' | '~')
}

fn is_punctuation(character: char) -> bool {
    matches!(character, '(' | ')')
}

fn is_digit_or_dot(character: char) -> bool {
    character.is_ascii_digit() || character == '.'
}

fn is_identifier_start(character: char) -> bool {
    character.is_alphabetic() || character == '_'
}

fn is_identifier_part(character: char) -> bool {
    character.is_alphanumeric() || character == '_'
}

const SHIFTS: [&str; 2] = ["<<", ">>"];
const RADIX_PREFIXES: [&str; 4] = ["0x", "0X", "0b", "0B"];

impl StringScanner {
    pub fn new(string: impl Into<String>) -> Result<Self> {
        let mut source = Self {
            string: string.into(),
            token: None,
            index: 0,
        };
        source.advance()?;
        Ok(source)
    }

    /// Byte length of the run at the cursor, starting `offset` bytes in,
    /// whose characters satisfy `predicate`.
    fn count<P: Fn(char) -> bool>(&self, offset: usize, predicate: P) -> usize {
        self.view()[offset..]
            .chars()
            .take_while(|c| predicate(*c))
            .map(char::len_utf8)
            .sum()
    }

    fn view(&self) -> &str {
        &self.string[self.index..]
    }

    pub fn is_empty(&self) -> bool {
        self.string.trim().is_empty()
    }

    fn skip_whitespace(&mut self) {
        let count = self.count(0, char::is_whitespace);
        self.index += count;
    }

    fn get_number(&self) -> Token {
        let count = match RADIX_PREFIXES.iter().find(|prefix| self.view().starts_with(*prefix)) {
            Some(prefix) => prefix.len() + self.count(prefix.len(), |c| c.is_ascii_alphanumeric()),
            None => self.count(0, is_digit_or_dot),
        };
        Token::new(&self.view()[..count], TokenKind::number)
    }

    fn get_identifier(&self) -> Token {
        let count = self.count(0, is_identifier_part);
        Token::new(&self.view()[..count], TokenKind::identifier)
    }

    fn get_single(&self, kind: TokenKind) -> Token {
        let length = self.view().chars().next().map_or(0, char::len_utf8);
        Token::new(&self.view()[..length], kind)
    }

    fn starts_number(&self) -> bool {
        let mut chars = self.view().chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn get_token(&self) -> Result<Option<Token>> {
        let view = self.view();
        let token = if view.is_empty() {
            None
        } else if self.starts_number() {
            Some(self.get_number())
        } else if view.starts_with(is_identifier_start) {
            Some(self.get_identifier())
        } else if let Some(shift) = SHIFTS.iter().find(|shift| view.starts_with(*shift)) {
            Some(Token::new(*shift, TokenKind::operator))
        } else if view.starts_with(is_operator) {
            Some(self.get_single(TokenKind::operator))
        } else if view.starts_with(is_punctuation) {
            Some(self.get_single(TokenKind::punctuation))
        } else {
            return Err(CalcError::invalid_character(self.get_single(TokenKind::punctuation).content));
        };
        Ok(token)
    }
}

impl Scanner for StringScanner {
    fn get_current(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    fn advance(&mut self) -> Result<()> {
        if let Some(token) = &self.token {
            self.index += token.content.len();
        }
        self.skip_whitespace();
        self.token = self.get_token()?;
        Ok(())
    }
}

/// Splits `string` into tokens in one go.
pub fn tokenize(string: &str) -> Result<Vec<Token>> {
    let mut scanner = StringScanner::new(string)?;
    let mut tokens = Vec::new();
    while let Some(token) = scanner.get_current() {
        tokens.push(token.clone());
        scanner.advance()?;
    }
    Ok(tokens)
}

use std::collections::HashMap;

use aho_corasick::AhoCorasick;
use lazy_static::lazy_static;
use memchr::{memchr, memchr2, memchr3, memchr_iter};

use crate::error::{SyntaxError, SyntaxErrorType, SyntaxResult};
use crate::source::{Source, SourceRange};
use crate::token::{Token, TokenType};

// Byte classes for the grammar this front-end accepts: identifiers are
// `[A-Za-z_$][A-Za-z0-9_$]*` at the ASCII level, and any multi-byte UTF-8
// sequence is taken to continue an identifier.

pub fn is_id_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'$' || c == b'_'
}

pub fn is_id_continue(c: u8) -> bool {
    is_id_start(c) || c.is_ascii_digit()
}

// XML tag and attribute names also allow `-` and `.` after the first
// character.
pub fn is_xml_name_char(c: u8) -> bool {
    is_id_continue(c) || c == b'-' || c == b'.'
}

pub fn is_space(c: u8) -> bool {
    match c {
        b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r' | b' ' => true,
        _ => false,
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
pub enum LexMode {
    // A leading `/` opens a regex literal rather than a division operator.
    SlashIsRegex,
    Standard,
}

#[derive(Copy, Clone)]
pub struct LexerCheckpoint {
    pos: usize,
    line: u32,
}

lazy_static! {
    // Words the scanner folds identifiers into. The boolean and null
    // literals lex like keywords but carry their own token types.
    static ref KEYWORDS: HashMap<&'static [u8], TokenType> = {
        let mut map = HashMap::<&'static [u8], TokenType>::new();
        map.insert(&b"break"[..], TokenType::KeywordBreak);
        map.insert(&b"case"[..], TokenType::KeywordCase);
        map.insert(&b"catch"[..], TokenType::KeywordCatch);
        map.insert(&b"continue"[..], TokenType::KeywordContinue);
        map.insert(&b"default"[..], TokenType::KeywordDefault);
        map.insert(&b"delete"[..], TokenType::KeywordDelete);
        map.insert(&b"do"[..], TokenType::KeywordDo);
        map.insert(&b"else"[..], TokenType::KeywordElse);
        map.insert(&b"false"[..], TokenType::LiteralFalse);
        map.insert(&b"finally"[..], TokenType::KeywordFinally);
        map.insert(&b"for"[..], TokenType::KeywordFor);
        map.insert(&b"function"[..], TokenType::KeywordFunction);
        map.insert(&b"if"[..], TokenType::KeywordIf);
        map.insert(&b"in"[..], TokenType::KeywordIn);
        map.insert(&b"instanceof"[..], TokenType::KeywordInstanceof);
        map.insert(&b"new"[..], TokenType::KeywordNew);
        map.insert(&b"null"[..], TokenType::LiteralNull);
        map.insert(&b"return"[..], TokenType::KeywordReturn);
        map.insert(&b"switch"[..], TokenType::KeywordSwitch);
        map.insert(&b"this"[..], TokenType::KeywordThis);
        map.insert(&b"throw"[..], TokenType::KeywordThrow);
        map.insert(&b"true"[..], TokenType::LiteralTrue);
        map.insert(&b"try"[..], TokenType::KeywordTry);
        map.insert(&b"typeof"[..], TokenType::KeywordTypeof);
        map.insert(&b"var"[..], TokenType::KeywordVar);
        map.insert(&b"void"[..], TokenType::KeywordVoid);
        map.insert(&b"while"[..], TokenType::KeywordWhile);
        map.insert(&b"with"[..], TokenType::KeywordWith);
        map
    };

    static ref BLOCK_COMMENT_END: AhoCorasick = AhoCorasick::new(&[b"*/"]);
    static ref XML_COMMENT_END: AhoCorasick = AhoCorasick::new(&[b"-->"]);
    static ref XML_PI_END: AhoCorasick = AhoCorasick::new(&[b"?>"]);
}

pub struct Lexer {
    source: Source,
    pos: usize,
    // 1-based line of `pos`.
    line: u32,
}

impl Lexer {
    pub fn new(code: Vec<u8>) -> Lexer {
        Lexer {
            source: Source::new(code),
            pos: 0,
            line: 1,
        }
    }

    fn rest(&self) -> &[u8] {
        &self.source.code()[self.pos..]
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.source.code().len()
    }

    pub fn byte_ahead(&self, n: usize) -> Option<u8> {
        self.source.code().get(self.pos + n).copied()
    }

    fn byte(&self, n: usize) -> SyntaxResult<u8> {
        self.byte_ahead(n)
            .ok_or_else(|| self.error(SyntaxErrorType::UnexpectedEnd))
    }

    fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
        SyntaxError::new(typ, self.pos, self.line)
    }

    pub fn checkpoint(&self) -> LexerCheckpoint {
        LexerCheckpoint {
            pos: self.pos,
            line: self.line,
        }
    }

    pub fn since_checkpoint(&self, checkpoint: LexerCheckpoint) -> SourceRange {
        SourceRange {
            source: self.source.clone(),
            start: checkpoint.pos,
            end: self.pos,
        }
    }

    pub fn apply_checkpoint(&mut self, checkpoint: LexerCheckpoint) -> () {
        self.pos = checkpoint.pos;
        self.line = checkpoint.line;
    }

    // Every advance goes through here; the line counter follows the newlines
    // in whatever was consumed.
    fn bump(&mut self, n: usize) -> () {
        debug_assert!(self.pos + n <= self.source.code().len());
        self.line += memchr_iter(b'\n', &self.source.code()[self.pos..self.pos + n]).count() as u32;
        self.pos += n;
    }

    fn bump_while<F: Fn(u8) -> bool>(&mut self, keep: F) -> () {
        let mut n = 0;
        while self.byte_ahead(n).map_or(false, |c| keep(c)) {
            n += 1;
        }
        self.bump(n);
    }

    // Advances to the next occurrence of either byte, or the end of input.
    fn bump_to_any2(&mut self, a: u8, b: u8) -> () {
        let n = memchr2(a, b, self.rest()).unwrap_or(self.rest().len());
        self.bump(n);
    }

    fn bump_to_any3(&mut self, a: u8, b: u8, c: u8) -> () {
        let n = memchr3(a, b, c, self.rest()).unwrap_or(self.rest().len());
        self.bump(n);
    }

    // Advances just past the next occurrence of `needle`.
    fn bump_through(&mut self, needle: &AhoCorasick) -> SyntaxResult<()> {
        match needle.find(self.rest()) {
            Some(found) => {
                self.bump(found.end());
                Ok(())
            }
            None => Err(self.error(SyntaxErrorType::UnexpectedEnd)),
        }
    }

    fn mark(&self) -> usize {
        self.pos
    }

    fn range_from(&self, start: usize) -> SourceRange {
        SourceRange {
            source: self.source.clone(),
            start,
            end: self.pos,
        }
    }

    fn token(&self, start: usize, typ: TokenType, lineno: u32, preceded: bool) -> Token {
        Token::new(self.range_from(start), typ, lineno, preceded)
    }
}

fn skip_line_comment(lexer: &mut Lexer) -> () {
    // Through the line terminator, or to the end of input on the last line.
    let n = memchr(b'\n', lexer.rest())
        .map(|i| i + 1)
        .unwrap_or(lexer.rest().len());
    lexer.bump(n);
}

fn skip_block_comment(lexer: &mut Lexer) -> SyntaxResult<()> {
    lexer.bump(2);
    lexer.bump_through(&BLOCK_COMMENT_END)
}

// An identifier or keyword. Which one it is only becomes clear once the whole
// word has been consumed.
fn scan_word(lexer: &mut Lexer, lineno: u32, preceded: bool) -> Token {
    let start = lexer.mark();
    loop {
        lexer.bump_while(is_id_continue);
        match lexer.byte_ahead(0) {
            Some(c) if !c.is_ascii() => lexer.bump(1),
            _ => break,
        };
    }
    let typ = KEYWORDS
        .get(&lexer.source.code()[start..lexer.pos])
        .copied()
        .unwrap_or(TokenType::Identifier);
    lexer.token(start, typ, lineno, preceded)
}

// Decimal (with optional fraction and exponent) or `0x` hex. Malformed tails
// like `1e` surface later as number normalisation errors.
fn scan_number(lexer: &mut Lexer, lineno: u32, preceded: bool) -> Token {
    let start = lexer.mark();
    let hex = lexer.byte_ahead(0) == Some(b'0')
        && match lexer.byte_ahead(1) {
            Some(b'x') | Some(b'X') => true,
            _ => false,
        };
    if hex {
        lexer.bump(2);
        lexer.bump_while(|c| c.is_ascii_hexdigit());
    } else {
        lexer.bump_while(|c| c.is_ascii_digit());
        if lexer.byte_ahead(0) == Some(b'.') {
            lexer.bump(1);
            lexer.bump_while(|c| c.is_ascii_digit());
        };
        match lexer.byte_ahead(0) {
            Some(b'e') | Some(b'E') => {
                lexer.bump(1);
                match lexer.byte_ahead(0) {
                    Some(b'+') | Some(b'-') => lexer.bump(1),
                    _ => {}
                };
                lexer.bump_while(|c| c.is_ascii_digit());
            }
            _ => {}
        };
    };
    lexer.token(start, TokenType::LiteralNumber, lineno, preceded)
}

fn scan_string(lexer: &mut Lexer, lineno: u32, preceded: bool) -> SyntaxResult<Token> {
    let start = lexer.mark();
    let quote = lexer.byte(0)?;
    lexer.bump(1);
    loop {
        lexer.bump_to_any3(quote, b'\\', b'\n');
        match lexer.byte(0)? {
            b'\\' => {
                // The escaped character comes along, whatever it is.
                lexer.byte(1)?;
                lexer.bump(2);
            }
            b'\n' => return Err(lexer.error(SyntaxErrorType::LineTerminatorInString)),
            _ => {
                // The closing quote.
                lexer.bump(1);
                break;
            }
        };
    }
    Ok(lexer.token(start, TokenType::LiteralString, lineno, preceded))
}

fn scan_regex(lexer: &mut Lexer, lineno: u32, preceded: bool) -> SyntaxResult<Token> {
    let start = lexer.mark();
    // Leading slash.
    lexer.bump(1);
    // A `/` inside a character class does not close the literal.
    let mut in_class = false;
    loop {
        match lexer.byte(0)? {
            b'\n' => return Err(lexer.error(SyntaxErrorType::LineTerminatorInRegex)),
            b'\\' => {
                if lexer.byte(1)? == b'\n' {
                    return Err(lexer.error(SyntaxErrorType::LineTerminatorInRegex));
                };
                lexer.bump(2);
            }
            b'[' => {
                in_class = true;
                lexer.bump(1);
            }
            b']' => {
                in_class = false;
                lexer.bump(1);
            }
            b'/' if !in_class => {
                lexer.bump(1);
                break;
            }
            _ => lexer.bump(1),
        };
    }
    // Flags.
    lexer.bump_while(is_id_continue);
    Ok(lexer.token(start, TokenType::LiteralRegex, lineno, preceded))
}

// Operators and punctuation dispatch on their first byte, longest form first.
fn scan_punctuator(lexer: &mut Lexer, lineno: u32, preceded: bool) -> SyntaxResult<Token> {
    use TokenType::*;
    let b1 = lexer.byte(0)?;
    let b2 = lexer.byte_ahead(1);
    let b3 = lexer.byte_ahead(2);
    let b4 = lexer.byte_ahead(3);
    let (typ, len) = match b1 {
        b'{' => (BraceOpen, 1),
        b'}' => (BraceClose, 1),
        b'(' => (ParenthesisOpen, 1),
        b')' => (ParenthesisClose, 1),
        b'[' => (BracketOpen, 1),
        b']' => (BracketClose, 1),
        b';' => (Semicolon, 1),
        b',' => (Comma, 1),
        b'~' => (Tilde, 1),
        b'?' => (Question, 1),
        b'@' => (At, 1),
        b':' => match b2 {
            Some(b':') => (ColonColon, 2),
            _ => (Colon, 1),
        },
        b'.' => match b2 {
            Some(b'.') => (DotDot, 2),
            _ => (Dot, 1),
        },
        b'+' => match b2 {
            Some(b'+') => (PlusPlus, 2),
            Some(b'=') => (PlusEquals, 2),
            _ => (Plus, 1),
        },
        b'-' => match b2 {
            Some(b'-') => (HyphenHyphen, 2),
            Some(b'=') => (HyphenEquals, 2),
            _ => (Hyphen, 1),
        },
        b'*' => match b2 {
            Some(b'=') => (AsteriskEquals, 2),
            _ => (Asterisk, 1),
        },
        b'/' => match b2 {
            Some(b'=') => (SlashEquals, 2),
            _ => (Slash, 1),
        },
        b'%' => match b2 {
            Some(b'=') => (PercentEquals, 2),
            _ => (Percent, 1),
        },
        b'^' => match b2 {
            Some(b'=') => (CaretEquals, 2),
            _ => (Caret, 1),
        },
        b'&' => match b2 {
            Some(b'&') => (AmpersandAmpersand, 2),
            Some(b'=') => (AmpersandEquals, 2),
            _ => (Ampersand, 1),
        },
        b'|' => match b2 {
            Some(b'|') => (BarBar, 2),
            Some(b'=') => (BarEquals, 2),
            _ => (Bar, 1),
        },
        b'=' => match (b2, b3) {
            (Some(b'='), Some(b'=')) => (EqualsEqualsEquals, 3),
            (Some(b'='), _) => (EqualsEquals, 2),
            _ => (Equals, 1),
        },
        b'!' => match (b2, b3) {
            (Some(b'='), Some(b'=')) => (ExclamationEqualsEquals, 3),
            (Some(b'='), _) => (ExclamationEquals, 2),
            _ => (Exclamation, 1),
        },
        b'<' => match (b2, b3) {
            (Some(b'<'), Some(b'=')) => (ChevronLeftChevronLeftEquals, 3),
            (Some(b'<'), _) => (ChevronLeftChevronLeft, 2),
            (Some(b'='), _) => (ChevronLeftEquals, 2),
            _ => (ChevronLeft, 1),
        },
        b'>' => match (b2, b3, b4) {
            (Some(b'>'), Some(b'>'), Some(b'=')) => {
                (ChevronRightChevronRightChevronRightEquals, 4)
            }
            (Some(b'>'), Some(b'>'), _) => (ChevronRightChevronRightChevronRight, 3),
            (Some(b'>'), Some(b'='), _) => (ChevronRightChevronRightEquals, 3),
            (Some(b'>'), _, _) => (ChevronRightChevronRight, 2),
            (Some(b'='), _, _) => (ChevronRightEquals, 2),
            _ => (ChevronRight, 1),
        },
        _ => return Err(lexer.error(SyntaxErrorType::ExpectedSyntax("token"))),
    };
    let start = lexer.mark();
    lexer.bump(len);
    Ok(lexer.token(start, typ, lineno, preceded))
}

pub fn lex_next(lexer: &mut Lexer, mode: LexMode) -> SyntaxResult<Token> {
    let entry_line = lexer.line();
    loop {
        lexer.bump_while(is_space);
        // Comments count as well: a token after a comment containing a line
        // terminator sits on a later line than the previous token.
        let preceded = lexer.line() > entry_line;
        let lineno = lexer.line();

        let c = match lexer.byte_ahead(0) {
            None => {
                let end = lexer.mark();
                return Ok(lexer.token(end, TokenType::EOF, lineno, preceded));
            }
            Some(c) => c,
        };

        return Ok(match c {
            b'/' => match lexer.byte_ahead(1) {
                Some(b'/') => {
                    skip_line_comment(lexer);
                    continue;
                }
                Some(b'*') => {
                    skip_block_comment(lexer)?;
                    continue;
                }
                _ => {
                    if mode == LexMode::SlashIsRegex {
                        scan_regex(lexer, lineno, preceded)?
                    } else {
                        scan_punctuator(lexer, lineno, preceded)?
                    }
                }
            },
            b'"' | b'\'' => scan_string(lexer, lineno, preceded)?,
            b'.' => {
                // `.5` is a number; `.` and `..` are operators.
                if lexer.byte_ahead(1).map_or(false, |c| c.is_ascii_digit()) {
                    scan_number(lexer, lineno, preceded)
                } else {
                    scan_punctuator(lexer, lineno, preceded)?
                }
            }
            c if c.is_ascii_digit() => scan_number(lexer, lineno, preceded),
            c if is_id_start(c) || !c.is_ascii() => scan_word(lexer, lineno, preceded),
            _ => scan_punctuator(lexer, lineno, preceded)?,
        });
    }
}

// Raw-character scanning for E4X XML literals. The XML grammar does not
// tokenise like JavaScript, so the parser drives these directly.

/// Consumes raw XML text up to (but excluding) the next `<` or `{`. Returns
/// the consumed range and whether it was pure whitespace.
pub fn lex_xml_text(lexer: &mut Lexer) -> SyntaxResult<(SourceRange, bool)> {
    let start = lexer.mark();
    lexer.bump_to_any2(b'<', b'{');
    if lexer.at_end() {
        return Err(lexer.error(SyntaxErrorType::UnexpectedEnd));
    };
    let range = lexer.range_from(start);
    let whitespace = range.as_slice().iter().all(|&c| is_space(c));
    Ok((range, whitespace))
}

/// Consumes an XML name: an identifier starter followed by XML name
/// characters.
pub fn lex_xml_name(lexer: &mut Lexer) -> SyntaxResult<SourceRange> {
    let start = lexer.mark();
    if !is_id_start(lexer.byte(0)?) {
        return Err(lexer.error(SyntaxErrorType::MalformedXml("name expected")));
    };
    lexer.bump(1);
    lexer.bump_while(is_xml_name_char);
    Ok(lexer.range_from(start))
}

/// Consumes comment content through the closing `-->`; returns the interior
/// text.
pub fn lex_xml_comment(lexer: &mut Lexer) -> SyntaxResult<SourceRange> {
    let start = lexer.mark();
    lexer.bump_through(&XML_COMMENT_END)?;
    let mut range = lexer.range_from(start);
    range.end -= 3;
    Ok(range)
}

/// Consumes processing-instruction content through the closing `?>`; returns
/// the interior text.
pub fn lex_xml_pi(lexer: &mut Lexer) -> SyntaxResult<SourceRange> {
    let start = lexer.mark();
    lexer.bump_through(&XML_PI_END)?;
    let mut range = lexer.range_from(start);
    range.end -= 2;
    Ok(range)
}

/// Consumes a quoted XML attribute value (including quotes); returns the
/// interior text.
pub fn lex_xml_attr_value(lexer: &mut Lexer) -> SyntaxResult<SourceRange> {
    let quote = lexer.byte(0)?;
    if quote != b'"' && quote != b'\'' {
        return Err(lexer.error(SyntaxErrorType::MalformedXml("quoted attribute expected")));
    };
    lexer.bump(1);
    let start = lexer.mark();
    match memchr(quote, lexer.rest()) {
        Some(i) => {
            lexer.bump(i + 1);
            let mut range = lexer.range_from(start);
            range.end -= 1;
            Ok(range)
        }
        None => Err(lexer.error(SyntaxErrorType::UnexpectedEnd)),
    }
}

/// Skips XML-insignificant whitespace between attributes and names.
pub fn skip_xml_whitespace(lexer: &mut Lexer) -> () {
    lexer.bump_while(is_space);
}

/// Peeks the next raw byte without tokenising.
pub fn peek_xml_byte(lexer: &Lexer) -> SyntaxResult<u8> {
    lexer.byte(0)
}

/// Consumes a single expected raw byte.
pub fn eat_xml_byte(lexer: &mut Lexer, c: u8) -> SyntaxResult<()> {
    if lexer.byte(0)? != c {
        return Err(lexer.error(SyntaxErrorType::MalformedXml("unexpected character")));
    };
    lexer.bump(1);
    Ok(())
}

/// Consumes a single expected raw byte if present.
pub fn eat_xml_byte_if(lexer: &mut Lexer, c: u8) -> bool {
    if lexer.byte_ahead(0) == Some(c) {
        lexer.bump(1);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(code: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(code.as_bytes().to_vec());
        let mut tokens = Vec::new();
        loop {
            let t = lex_next(&mut lexer, LexMode::Standard).unwrap();
            if t.typ() == TokenType::EOF {
                return tokens;
            };
            tokens.push(t);
        }
    }

    fn types(code: &str) -> Vec<TokenType> {
        lex_all(code).iter().map(|t| t.typ()).collect()
    }

    #[test]
    fn test_lex_keywords_vs_identifier_prefixes() {
        assert_eq!(
            types("for format in inside"),
            vec![
                TokenType::KeywordFor,
                TokenType::Identifier,
                TokenType::KeywordIn,
                TokenType::Identifier,
            ]
        );
    }

    #[test]
    fn test_lex_longest_punctuator_wins() {
        assert_eq!(
            types(">>>= >>> >>= >> >="),
            vec![
                TokenType::ChevronRightChevronRightChevronRightEquals,
                TokenType::ChevronRightChevronRightChevronRight,
                TokenType::ChevronRightChevronRightEquals,
                TokenType::ChevronRightChevronRight,
                TokenType::ChevronRightEquals,
            ]
        );
        assert_eq!(
            types("=== == = !== != !"),
            vec![
                TokenType::EqualsEqualsEquals,
                TokenType::EqualsEquals,
                TokenType::Equals,
                TokenType::ExclamationEqualsEquals,
                TokenType::ExclamationEquals,
                TokenType::Exclamation,
            ]
        );
    }

    #[test]
    fn test_lex_dots_and_numbers() {
        assert_eq!(
            types("a..b"),
            vec![TokenType::Identifier, TokenType::DotDot, TokenType::Identifier]
        );
        let tokens = lex_all("1..x .5");
        assert_eq!(tokens[0].typ(), TokenType::LiteralNumber);
        assert_eq!(tokens[0].loc().as_str(), "1.");
        assert_eq!(tokens[1].typ(), TokenType::Dot);
        assert_eq!(tokens[3].loc().as_str(), ".5");
    }

    #[test]
    fn test_lex_line_tracking_through_comments() {
        let tokens = lex_all("a // trailing\nb /* one\ntwo */ c");
        assert_eq!(tokens[0].lineno(), 1);
        assert!(!tokens[0].preceded_by_line_terminator());
        assert_eq!(tokens[1].lineno(), 2);
        assert!(tokens[1].preceded_by_line_terminator());
        assert_eq!(tokens[2].lineno(), 3);
        assert!(tokens[2].preceded_by_line_terminator());
    }

    #[test]
    fn test_lex_slash_mode() {
        let mut lexer = Lexer::new(b"/ab[/]c/gi".to_vec());
        let t = lex_next(&mut lexer, LexMode::SlashIsRegex).unwrap();
        assert_eq!(t.typ(), TokenType::LiteralRegex);
        assert_eq!(t.loc().as_str(), "/ab[/]c/gi");

        assert_eq!(types("a / b"), vec![
            TokenType::Identifier,
            TokenType::Slash,
            TokenType::Identifier,
        ]);
    }

    #[test]
    fn test_lex_string_escapes_and_hex() {
        let tokens = lex_all("'it\\'s' 0x1F");
        assert_eq!(tokens[0].typ(), TokenType::LiteralString);
        assert_eq!(tokens[0].loc().as_str(), "'it\\'s'");
        assert_eq!(tokens[1].typ(), TokenType::LiteralNumber);
        assert_eq!(tokens[1].loc().as_str(), "0x1F");
    }

    #[test]
    fn test_lex_rejects_raw_newline_in_string() {
        let mut lexer = Lexer::new(b"'a\nb'".to_vec());
        assert!(lex_next(&mut lexer, LexMode::Standard).is_err());
    }
}

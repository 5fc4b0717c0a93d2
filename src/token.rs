use crate::error::{SyntaxError, SyntaxErrorType};
use crate::source::SourceRange;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum TokenType {
    // Used to represent a type that should never be seen in actual code.
    // Often used to represent an omitted value without having to use `Option`.
    _Dummy,

    Ampersand,
    AmpersandAmpersand,
    AmpersandEquals,
    Asterisk,
    AsteriskEquals,
    At,
    Bar,
    BarBar,
    BarEquals,
    BraceClose,
    BraceOpen,
    BracketClose,
    BracketOpen,
    Caret,
    CaretEquals,
    ChevronLeft,
    ChevronLeftChevronLeft,
    ChevronLeftChevronLeftEquals,
    ChevronLeftEquals,
    ChevronRight,
    ChevronRightChevronRight,
    ChevronRightChevronRightChevronRight,
    ChevronRightChevronRightChevronRightEquals,
    ChevronRightChevronRightEquals,
    ChevronRightEquals,
    Colon,
    ColonColon,
    Comma,
    CommentMultiple,
    CommentSingle,
    Dot,
    DotDot,
    EOF,
    Equals,
    EqualsEquals,
    EqualsEqualsEquals,
    Exclamation,
    ExclamationEquals,
    ExclamationEqualsEquals,
    Hyphen,
    HyphenEquals,
    HyphenHyphen,
    Identifier,
    KeywordBreak,
    KeywordCase,
    KeywordCatch,
    KeywordContinue,
    KeywordDefault,
    KeywordDelete,
    KeywordDo,
    KeywordElse,
    KeywordFinally,
    KeywordFor,
    KeywordFunction,
    KeywordIf,
    KeywordIn,
    KeywordInstanceof,
    KeywordNew,
    KeywordReturn,
    KeywordSwitch,
    KeywordThis,
    KeywordThrow,
    KeywordTry,
    KeywordTypeof,
    KeywordVar,
    KeywordVoid,
    KeywordWhile,
    KeywordWith,
    LiteralFalse,
    LiteralNull,
    LiteralNumber,
    LiteralRegex,
    LiteralString,
    LiteralTrue,
    ParenthesisClose,
    ParenthesisOpen,
    Percent,
    PercentEquals,
    Plus,
    PlusEquals,
    PlusPlus,
    Question,
    Semicolon,
    Slash,
    SlashEquals,
    Tilde,
}

impl TokenType {
    /// Keywords and the keyword-like literals. These cannot stand as variable
    /// names, but they are tolerated as member names and object keys.
    pub fn is_keyword(self) -> bool {
        match self {
            TokenType::KeywordBreak
            | TokenType::KeywordCase
            | TokenType::KeywordCatch
            | TokenType::KeywordContinue
            | TokenType::KeywordDefault
            | TokenType::KeywordDelete
            | TokenType::KeywordDo
            | TokenType::KeywordElse
            | TokenType::KeywordFinally
            | TokenType::KeywordFor
            | TokenType::KeywordFunction
            | TokenType::KeywordIf
            | TokenType::KeywordIn
            | TokenType::KeywordInstanceof
            | TokenType::KeywordNew
            | TokenType::KeywordReturn
            | TokenType::KeywordSwitch
            | TokenType::KeywordThis
            | TokenType::KeywordThrow
            | TokenType::KeywordTry
            | TokenType::KeywordTypeof
            | TokenType::KeywordVar
            | TokenType::KeywordVoid
            | TokenType::KeywordWhile
            | TokenType::KeywordWith
            | TokenType::LiteralFalse
            | TokenType::LiteralNull
            | TokenType::LiteralTrue => true,
            _ => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Token {
    loc: SourceRange,
    // 1-based line the token starts on.
    lineno: u32,
    // Whether one or more whitespace characters appear immediately before this
    // token, and at least one of those whitespace characters is a line
    // terminator.
    preceded_by_line_terminator: bool,
    typ: TokenType,
}

impl Token {
    pub fn new(
        loc: SourceRange,
        typ: TokenType,
        lineno: u32,
        preceded_by_line_terminator: bool,
    ) -> Token {
        Token {
            loc,
            typ,
            lineno,
            preceded_by_line_terminator,
        }
    }

    pub fn typ(&self) -> TokenType {
        self.typ
    }

    pub fn loc(&self) -> &SourceRange {
        &self.loc
    }

    pub fn loc_take(self) -> SourceRange {
        self.loc
    }

    pub fn lineno(&self) -> u32 {
        self.lineno
    }

    pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
        SyntaxError::new(typ, self.loc.start, self.lineno)
    }

    pub fn preceded_by_line_terminator(&self) -> bool {
        self.preceded_by_line_terminator
    }
}

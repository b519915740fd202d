use std::fmt::Display;
use std::rc::Rc;

use crate::{
    lexer::prelude::{LexResult, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan,
};

#[derive(Debug)]
pub struct Parsed {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

// program -> declaration* EOF
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl Program {
    /// Top-level parse loop. Each failed statement is recorded and the
    /// parser resynchronizes at the next statement boundary, so a single
    /// mistake does not take the rest of the program with it.
    pub fn parse_with_recovery<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Self {
        let mut statements: Vec<Statement> = vec![];

        while !parser.at_end() {
            match Statement::parse(parser, None) {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    parser.errors.push(error);
                    parser.synchronize();
                }
            }
        }

        let location = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.location().merge(last.location()),
            _ => SrcSpan::default(),
        };

        Self { statements, location }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join("\n"))
    }
}

// statement -> funDecl | varDecl | printStmt | ifStmt | whileStmt
//            | forStmt | block | exprStmt
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(ExpressionStatement),
    Print(PrintStatement),
    Var(VarStatement),
    Block(Block),
    If(IfStatement),
    While(WhileStatement),
    Function(Rc<FunctionDeclaration>),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        match &parser.current_token {
            Some((_, token, _)) => match token {
                Token::Fun => Ok(Self::Function(Rc::new(FunctionDeclaration::parse(parser, None)?))),
                Token::Var => Ok(Self::Var(VarStatement::parse(parser, None)?)),
                Token::Print => Ok(Self::Print(PrintStatement::parse(parser, None)?)),
                Token::If => Ok(Self::If(IfStatement::parse(parser, None)?)),
                Token::While => Ok(Self::While(WhileStatement::parse(parser, None)?)),
                Token::For => parse_for(parser),
                Token::LeftBrace => Ok(Self::Block(Block::parse(parser, None)?)),
                _ => Ok(Self::Expression(ExpressionStatement::parse(parser, None)?)),
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expression(statement) => write!(f, "{statement}"),
            Self::Print(statement) => write!(f, "{statement}"),
            Self::Var(statement) => write!(f, "{statement}"),
            Self::Block(block) => write!(f, "{block}"),
            Self::If(statement) => write!(f, "{statement}"),
            Self::While(statement) => write!(f, "{statement}"),
            Self::Function(declaration) => write!(f, "{declaration}"),
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Expression(statement) => statement.location,
            Self::Print(statement) => statement.location,
            Self::Var(statement) => statement.location,
            Self::Block(block) => block.location,
            Self::If(statement) => statement.location,
            Self::While(statement) => statement.location,
            Self::Function(declaration) => declaration.location,
        }
    }
}

// exprStmt -> expression ";"
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for ExpressionStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let expression = Expression::parse(parser, None)?;
        let SrcSpan { start, end } = expression.location();

        let end = match parser.expect_one(Token::Semicolon) {
            Ok((_, end)) => end,
            Err(_) => return parse_error(
                ParseErrorType::MissingSemicolon,
                SrcSpan { start: end, end: end + 1 }
            )
        };

        Ok(Self {
            expression,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(expression {})", self.expression)
    }
}

// printStmt -> "print" expression ";"
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStatement {
    pub expression: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for PrintStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Print)?;

        let expression = Expression::parse(parser, None)?;
        let expression_end = expression.location().end;

        let end = match parser.expect_one(Token::Semicolon) {
            Ok((_, end)) => end,
            Err(_) => return parse_error(
                ParseErrorType::MissingSemicolon,
                SrcSpan { start: expression_end, end: expression_end + 1 }
            )
        };

        Ok(Self {
            expression,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for PrintStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(print {})", self.expression)
    }
}

// varDecl -> "var" IDENTIFIER ( "=" expression )? ";"
#[derive(Debug, Clone, PartialEq)]
pub struct VarStatement {
    pub name: Identifier,
    pub initializer: Option<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for VarStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Var)?;

        let name = Identifier::from(parser.expect_ident()?);

        let initializer = if parser.expect_one(Token::Equal).is_ok() {
            Some(Expression::parse(parser, None)?)
        } else {
            None
        };

        let before_semicolon = initializer.as_ref()
            .map(|expression| expression.location().end)
            .unwrap_or(name.location.end);

        let end = match parser.expect_one(Token::Semicolon) {
            Ok((_, end)) => end,
            Err(_) => return parse_error(
                ParseErrorType::MissingSemicolon,
                SrcSpan { start: before_semicolon, end: before_semicolon + 1 }
            )
        };

        Ok(Self {
            name,
            initializer,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for VarStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.initializer {
            Some(initializer) => write!(f, "(var {} = {})", self.name, initializer),
            None => write!(f, "(var {})", self.name)
        }
    }
}

// block -> "{" declaration* "}"
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Block {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LeftBrace)?;

        let mut statements: Vec<Statement> = vec![];

        loop {
            if parser.check(&Token::RightBrace) {
                break;
            }

            if parser.at_end() {
                return parse_error(
                    ParseErrorType::MissingClosingBrace,
                    SrcSpan { start, end: start + 1 }
                );
            }

            // The same recovery discipline as the top level, a bad
            // statement does not abandon the rest of the block.
            match Statement::parse(parser, None) {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    parser.errors.push(error);
                    parser.synchronize();
                }
            }
        }

        let (_, end) = parser.expect_one(Token::RightBrace)?;

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "(block {})", statements.join(" "))
    }
}

// ifStmt -> "if" "(" expression ")" statement ( "else" statement )?
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for IfStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::If)?;

        parser.expect_one(Token::LeftParen)?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(Token::RightParen)?;

        let then_branch = Box::new(Statement::parse(parser, None)?);
        let mut end = then_branch.location().end;

        let else_branch = if parser.expect_one(Token::Else).is_ok() {
            let alternative = Statement::parse(parser, None)?;
            end = alternative.location().end;

            Some(Box::new(alternative))
        } else {
            None
        };

        Ok(Self {
            condition,
            then_branch,
            else_branch,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.else_branch {
            Some(else_branch) => write!(
                f, "(if {} {} {})",
                self.condition, self.then_branch, else_branch
            ),
            None => write!(f, "(if {} {})", self.condition, self.then_branch)
        }
    }
}

// whileStmt -> "while" "(" expression ")" statement
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for WhileStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::While)?;

        parser.expect_one(Token::LeftParen)?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(Token::RightParen)?;

        let body = Box::new(Statement::parse(parser, None)?);
        let end = body.location().end;

        Ok(Self {
            condition,
            body,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for WhileStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(while {} {})", self.condition, self.body)
    }
}

// funDecl -> "fun" IDENTIFIER "(" params? ")" block
// params  -> IDENTIFIER ( "," IDENTIFIER )*
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for FunctionDeclaration {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Fun)?;

        let name = Identifier::from(parser.expect_ident()?);

        parser.expect_one(Token::LeftParen)?;

        let mut params: Vec<Identifier> = vec![];

        if !parser.check(&Token::RightParen) {
            loop {
                if params.len() == 255 {
                    if let Some((start, _, end)) = &parser.current_token {
                        parser.errors.push(ParseError {
                            error: ParseErrorType::TooManyParameters,
                            span: SrcSpan { start: *start, end: *end },
                        });
                    }
                }

                params.push(Identifier::from(parser.expect_ident()?));

                if parser.expect_one(Token::Comma).is_err() {
                    break;
                }
            }
        }

        parser.expect_one(Token::RightParen)?;

        let body = Block::parse(parser, None)?;
        let end = body.location.end;

        Ok(Self {
            name,
            params,
            body: body.statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for FunctionDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.params.iter()
            .map(|param| param.value.clone())
            .collect::<Vec<String>>();

        let body = self.body.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "(fun {} ({}) {})", self.name, params.join(" "), body.join(" "))
    }
}

// forStmt -> "for" "(" ( varDecl | exprStmt | ";" ) expression? ";"
//            expression? ")" statement
//
// There is no For node: the loop is desugared into the equivalent
// block/while combination, so the evaluator never knows `for` exists.
pub fn parse_for<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>
) -> Result<Statement, ParseError> {
    let (start, _) = parser.expect_one(Token::For)?;

    parser.expect_one(Token::LeftParen)?;

    let initializer = if parser.expect_one(Token::Semicolon).is_ok() {
        None
    } else if parser.check(&Token::Var) {
        Some(Statement::Var(VarStatement::parse(parser, None)?))
    } else {
        Some(Statement::Expression(ExpressionStatement::parse(parser, None)?))
    };

    let condition = if parser.check(&Token::Semicolon) {
        None
    } else {
        Some(Expression::parse(parser, None)?)
    };

    let condition_end = condition.as_ref()
        .map(|expression| expression.location().end);

    if let Err(error) = parser.expect_one(Token::Semicolon) {
        let end = condition_end.unwrap_or(error.span.start);

        return parse_error(
            ParseErrorType::MissingSemicolon,
            SrcSpan { start: end, end: end + 1 }
        );
    }

    let increment = if parser.check(&Token::RightParen) {
        None
    } else {
        Some(Expression::parse(parser, None)?)
    };

    let (paren_start, paren_end) = parser.expect_one(Token::RightParen)?;

    let mut body = Statement::parse(parser, None)?;
    let location = SrcSpan { start, end: body.location().end };

    if let Some(increment) = increment {
        let increment_location = increment.location();

        body = Statement::Block(Block {
            statements: vec![
                body,
                Statement::Expression(ExpressionStatement {
                    expression: increment,
                    location: increment_location,
                }),
            ],
            location,
        });
    }

    let condition = condition.unwrap_or(Expression::Literal(Literal {
        value: LiteralValue::Boolean(true),
        location: SrcSpan { start: paren_start, end: paren_end },
    }));

    body = Statement::While(WhileStatement {
        condition,
        body: Box::new(body),
        location,
    });

    if let Some(initializer) = initializer {
        body = Statement::Block(Block {
            statements: vec![initializer, body],
            location,
        });
    }

    Ok(body)
}

// expression -> assignment
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Grouping(Grouping),
    Unary(Unary),
    Binary(Binary),
    Logical(Logical),
    Variable(Identifier),
    Assign(Assign),
    Call(Call),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let mut expr = match &parser.current_token {
            Some((start, token, end)) => match token {
                Token::False
                | Token::True
                | Token::Nil
                | Token::Number(_)
                | Token::String(_) => Self::Literal(Literal::parse(parser, None)?),
                Token::Identifier(_) => {
                    Self::Variable(Identifier::from(parser.expect_ident()?))
                },
                Token::Bang | Token::Minus => Self::Unary(Unary::parse(parser, None)?),
                Token::LeftParen => {
                    let (start, _) = parser.expect_one(Token::LeftParen)?;

                    let expression = Box::new(Expression::parse(parser, None)?);

                    let (_, end) = parser.expect_one(Token::RightParen)?;

                    Self::Grouping(Grouping {
                        expression,
                        location: SrcSpan { start, end }
                    })
                },
                _ => return parse_error(
                    ParseErrorType::ExpectedExpression { token: token.clone() },
                    SrcSpan { start: *start, end: *end }
                )
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        while precedence.unwrap_or(Precedence::Lowest) < parser.current_precedence() {
            expr = match &parser.current_token {
                Some((_, token, _)) => match token {
                    Token::Equal => assignment(parser, expr)?,
                    Token::Or | Token::And => {
                        Self::Logical(Logical::parse(parser, expr, precedence)?)
                    },
                    Token::LeftParen => {
                        Self::Call(Call::parse(parser, expr, precedence)?)
                    },
                    Token::BangEqual | Token::EqualEqual
                    | Token::Greater | Token::GreaterEqual
                    | Token::Less | Token::LessEqual
                    | Token::Minus | Token::Plus
                    | Token::Slash | Token::Star => {
                        Self::Binary(Binary::parse(parser, expr, precedence)?)
                    },
                    _ => break,
                },
                None => break,
            };
        }

        Ok(expr)
    }
}

// assignment -> IDENTIFIER "=" assignment | logic_or
//
// The left side arrives already parsed as a general expression; only a
// plain variable is a legal target. Anything else is recorded as a
// diagnostic and the target is handed back untouched, which keeps the
// parse going.
fn assignment<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>,
    target: Expression
) -> Result<Expression, ParseError> {
    let (equals_start, equals_end) = parser.expect_one(Token::Equal)?;

    // Right associative: `a = b = c` parses the whole of `b = c` here.
    let value = Expression::parse(parser, Some(Precedence::Lowest))?;

    match target {
        Expression::Variable(name) => {
            let location = name.location.merge(value.location());

            Ok(Expression::Assign(Assign {
                name,
                value: Box::new(value),
                location,
            }))
        },
        target => {
            parser.errors.push(ParseError {
                error: ParseErrorType::InvalidAssignmentTarget,
                span: SrcSpan { start: equals_start, end: equals_end },
            });

            Ok(target)
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Grouping(grouping) => write!(f, "{grouping}"),
            Self::Unary(unary) => write!(f, "{unary}"),
            Self::Binary(binary) => write!(f, "{binary}"),
            Self::Logical(logical) => write!(f, "{logical}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Assign(assign) => write!(f, "{assign}"),
            Self::Call(call) => write!(f, "{call}"),
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Literal(literal) => literal.location,
            Self::Grouping(grouping) => grouping.location,
            Self::Unary(unary) => unary.location,
            Self::Binary(binary) => binary.location,
            Self::Logical(logical) => logical.location,
            Self::Variable(name) => name.location,
            Self::Assign(assign) => assign.location,
            Self::Call(call) => call.location,
        }
    }
}

// primary -> "false" | "true" | "nil" | NUMBER | STRING
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Literal {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        match parser.next_token() {
            Some((start, token, end)) => {
                let location = SrcSpan { start, end };

                let value = match token {
                    Token::Number(value) => LiteralValue::Number(value),
                    Token::String(value) => LiteralValue::String(value),
                    Token::True => LiteralValue::Boolean(true),
                    Token::False => LiteralValue::Boolean(false),
                    Token::Nil => LiteralValue::Nil,
                    token => return parse_error(
                        ParseErrorType::ExpectedExpression { token },
                        location
                    ),
                };

                Ok(Self { value, location })
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            LiteralValue::Nil => write!(f, "nil"),
            LiteralValue::Boolean(value) => write!(f, "{value}"),
            LiteralValue::Number(value) => write!(f, "{value}"),
            LiteralValue::String(value) => write!(f, "\"{value}\""),
        }
    }
}

// "(" expression ")"
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping {
    pub expression: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Grouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(group {})", self.expression)
    }
}

// unary -> ( "!" | "-" ) unary | call
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operator: Token,
    pub operator_location: SrcSpan,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Unary {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, operator, operator_end) = match parser.next_token() {
            Some(spanned) => spanned,
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        let right = Expression::parse(parser, Some(Precedence::Unary))?;
        let end = right.location().end;

        Ok(Self {
            operator,
            operator_location: SrcSpan { start, end: operator_end },
            right: Box::new(right),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Unary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {})", self.operator.as_literal(), self.right)
    }
}

// equality | comparison | term | factor, all left associative
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Box<Expression>,
    pub operator: Token,
    pub operator_location: SrcSpan,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Binary {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();

        let (operator_start, operator, operator_end) = match parser.next_token() {
            Some(spanned) => spanned,
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        // Left associative: the right operand binds at the operator's
        // own precedence, so an equal-precedence operator ends it.
        let right = Expression::parse(parser, Some(precedence))?;

        let location = left.location().merge(right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            operator_location: SrcSpan { start: operator_start, end: operator_end },
            right: Box::new(right),
            location
        })
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.operator.as_literal(), self.left, self.right)
    }
}

// logic_or  -> logic_and ( "or" logic_and )*
// logic_and -> equality ( "and" equality )*
#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    pub left: Box<Expression>,
    pub operator: Token,
    pub operator_location: SrcSpan,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Logical {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();

        let (operator_start, operator, operator_end) = match parser.next_token() {
            Some(spanned) => spanned,
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        let right = Expression::parse(parser, Some(precedence))?;

        let location = left.location().merge(right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            operator_location: SrcSpan { start: operator_start, end: operator_end },
            right: Box::new(right),
            location
        })
    }
}

impl Display for Logical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f, "({} {} {})",
            self.operator.as_literal().to_uppercase(),
            self.left,
            self.right
        )
    }
}

// call -> primary ( "(" arguments? ")" )*
// arguments -> expression ( "," expression )*
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    /// Span of the closing parenthesis, where call-site errors point.
    pub paren_location: SrcSpan,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Call {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::LeftParen)?;

        let mut arguments: Vec<Expression> = vec![];

        if !parser.check(&Token::RightParen) {
            loop {
                if arguments.len() == 255 {
                    if let Some((start, _, end)) = &parser.current_token {
                        parser.errors.push(ParseError {
                            error: ParseErrorType::TooManyArguments,
                            span: SrcSpan { start: *start, end: *end },
                        });
                    }
                }

                arguments.push(Expression::parse(parser, Some(Precedence::Lowest))?);

                if parser.expect_one(Token::Comma).is_err() {
                    break;
                }
            }
        }

        let (paren_start, paren_end) = parser.expect_one(Token::RightParen)?;

        let paren_location = SrcSpan { start: paren_start, end: paren_end };
        let location = left.location().merge(paren_location);

        Ok(Self {
            callee: Box::new(left),
            arguments,
            paren_location,
            location
        })
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self.arguments.iter()
            .map(|argument| format!("{argument}"))
            .collect::<Vec<String>>();

        if arguments.is_empty() {
            write!(f, "(call {})", self.callee)
        } else {
            write!(f, "(call {} {})", self.callee, arguments.join(" "))
        }
    }
}

// IDENTIFIER "=" assignment
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub name: Identifier,
    pub value: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Assign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(= {} {})", self.name, self.value)
    }
}

// identifier -> <letter or _> { <letter> | <digit> | _ }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

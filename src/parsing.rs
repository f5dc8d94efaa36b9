use crate::error_handling::*;
use crate::mode::Mode;
use crate::scanning::*;

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    negative,
    positive,
    complement,
}

impl UnaryOperator {
    /// Looks `content` up in the prefix operators `mode` accepts.
    pub fn lookup(mode: Mode, content: &str) -> Option<Self> {
        use UnaryOperator::*;
        match (mode, content.to_ascii_uppercase().as_str()) {
            (_, "-") => Some(negative),
            (_, "+") => Some(positive),
            (Mode::programming, "~" | "NOT") => Some(complement),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        use UnaryOperator::*;
        match self {
            negative => "-",
            positive => "+",
            complement => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    addition,
    subtraction,
    multiplication,
    division,
    remainder,
    exponentiation,
    and,
    or,
    xor,
    shift_left,
    shift_right,
}

impl BinaryOperator {
    /// Looks `content` up in the infix operators `mode` accepts. `^` is
    /// power in mathematics mode and exclusive or in programming mode.
    pub fn lookup(mode: Mode, content: &str) -> Option<Self> {
        use BinaryOperator::*;
        match (mode, content.to_ascii_uppercase().as_str()) {
            (_, "+") => Some(addition),
            (_, "-") => Some(subtraction),
            (_, "*") => Some(multiplication),
            (_, "/") => Some(division),
            (Mode::mathematics, "^") => Some(exponentiation),
            (Mode::programming, "%") => Some(remainder),
            (Mode::programming, "&" | "AND") => Some(and),
            (Mode::programming, "|" | "OR") => Some(or),
            (Mode::programming, "^" | "XOR") => Some(xor),
            (Mode::programming, "<<" | "SHL") => Some(shift_left),
            (Mode::programming, ">>" | "SHR") => Some(shift_right),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        use BinaryOperator::*;
        match self {
            addition => "+",
            subtraction => "-",
            multiplication => "*",
            division => "/",
            remainder => "%",
            exponentiation | xor => "^",
            and => "&",
            or => "|",
            shift_left => "<<",
            shift_right => ">>",
        }
    }

    fn is_right_associative(&self) -> bool {
        matches!(self, BinaryOperator::exponentiation)
    }
}

pub(crate) fn is_operator_word(mode: Mode, content: &str) -> bool {
    BinaryOperator::lookup(mode, content).is_some() || UnaryOperator::lookup(mode, content).is_some()
}

/// Rejects an operator symbol that is either misplaced or foreign to `mode`.
fn reject_operator(mode: Mode, content: &str) -> CalcError {
    if is_operator_word(mode, content) {
        CalcError::invalid_operator(content.into())
    } else {
        CalcError::unsupported_operator(content.into(), mode.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    unary(UnaryOperator),
    binary(BinaryOperator),
}

pub enum Punctuation {
    paren,
}

pub enum StackNode {
    operator(Operator),
    punctuation(Punctuation),
}

impl StackNode {
    fn precedence(&self) -> i32 {
        use Operator::*;
        use BinaryOperator::*;
        match self {
            Self::punctuation(_) => 0,
            Self::operator(binary(operator)) =>
                match operator {
                    or => 1,
                    xor => 2,
                    and => 3,
                    shift_left | shift_right => 4,
                    addition | subtraction => 5,
                    multiplication | division | remainder => 6,
                    exponentiation => 8,
                },
            Self::operator(unary(_)) => 7,
        }
    }
}

/// One step of an expression in postfix order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprNode {
    number(String),
    variable(String),
    operator(Operator),
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidNode;

impl TryFrom<StackNode> for ExprNode {
    type Error = InvalidNode;

    fn try_from(node: StackNode) -> std::result::Result<Self, Self::Error> {
        match node {
            StackNode::operator(operator) => Ok(ExprNode::operator(operator)),
            _ => Err(InvalidNode),
        }
    }
}

pub struct Yard {
    mode: Mode,
    max_depth: usize,
    expression: Vec<ExprNode>,
    stack: Vec<StackNode>,
}

impl Yard {
    pub fn new(mode: Mode, max_depth: usize) -> Self {
        Self{mode, max_depth, expression: Vec::new(), stack: Vec::new()}
    }

    fn push(&mut self, node: StackNode) -> Result<()> {
        if self.stack.len() >= self.max_depth {
            return Err(CalcError::too_complex(self.max_depth));
        }
        self.stack.push(node);
        Ok(())
    }

    fn add_number(&mut self, content: &str) {
        self.expression.push(ExprNode::number(content.into()));
    }

    fn add_variable(&mut self, content: &str) {
        self.expression.push(ExprNode::variable(content.into()));
    }

    fn pop_higher_operator(&mut self, precedence: i32, right_associative: bool) -> Option<Operator> {
        let higher = |node: &&StackNode| {
            let top = node.precedence();
            top > precedence || (top == precedence && !right_associative)
        };
        if !matches!(self.stack.last().filter(higher), Some(StackNode::operator(_))) {
            return None;
        }
        match self.stack.pop() {
            Some(StackNode::operator(operator)) => Some(operator),
            _ => None,
        }
    }

    fn add_unary(&mut self, operator: UnaryOperator) -> Result<()> {
        self.push(StackNode::operator(Operator::unary(operator)))
    }

    fn add_binary(&mut self, operator: BinaryOperator) -> Result<()> {
        let node = StackNode::operator(Operator::binary(operator));
        let precedence = node.precedence();
        while let Some(popped) = self.pop_higher_operator(precedence, operator.is_right_associative()) {
            self.expression.push(ExprNode::operator(popped));
        }
        self.push(node)
    }

    fn add_left_paren(&mut self) -> Result<()> {
        self.push(StackNode::punctuation(Punctuation::paren))
    }

    fn add_right_paren(&mut self) -> Result<()> {
        while let Some(stack_node) = self.stack.pop() {
            if let StackNode::punctuation(Punctuation::paren) = stack_node {
                return Ok(());
            }
            if let Ok(node) = stack_node.try_into() {
                self.expression.push(node);
            }
        }
        Err(CalcError::could_not_find("(".into()))
    }

    pub fn finish(mut self) -> Result<Vec<ExprNode>> {
        while let Some(stack_node) = self.stack.pop() {
            match stack_node.try_into() {
                Ok(node) => self.expression.push(node),
                Err(InvalidNode) => return Err(CalcError::could_not_find(")".into())),
            }
        }
        Ok(self.expression)
    }
}

/// Handles a token where an operand is expected. Returns whether an operand
/// was completed.
pub fn handle_edge(yard: &mut Yard, token: &Token) -> Result<bool> {
    use TokenKind::*;
    let mode = yard.mode;
    match token.kind {
        number => {
            yard.add_number(&token.content);
            Ok(true)
        },
        identifier => {
            if let Some(found) = UnaryOperator::lookup(mode, &token.content) {
                yard.add_unary(found)?;
                Ok(false)
            } else if is_operator_word(mode, &token.content) {
                Err(CalcError::invalid_operator(token.content.clone()))
            } else {
                yard.add_variable(&token.content);
                Ok(true)
            }
        },
        operator => match UnaryOperator::lookup(mode, &token.content) {
            Some(found) => {
                yard.add_unary(found)?;
                Ok(false)
            },
            None => Err(reject_operator(mode, &token.content)),
        },
        punctuation => {
            match token.content.as_str() {
                "(" => yard.add_left_paren()?,
                _ => return Err(CalcError::did_not_expect(token.content.clone())),
            }
            Ok(false)
        },
    }
}

/// Handles a token where an operator is expected. Returns whether an operand
/// is expected next.
pub fn handle_middle(yard: &mut Yard, token: &Token) -> Result<bool> {
    use TokenKind::*;
    let mode = yard.mode;
    match token.kind {
        operator | identifier => match BinaryOperator::lookup(mode, &token.content) {
            Some(found) => {
                yard.add_binary(found)?;
                Ok(true)
            },
            None if token.kind == operator => Err(reject_operator(mode, &token.content)),
            None => Err(CalcError::did_not_expect(token.content.clone())),
        },
        punctuation => {
            match token.content.as_str() {
                ")" => yard.add_right_paren()?,
                _ => return Err(CalcError::did_not_expect(token.content.clone())),
            }
            Ok(false)
        },
        number => Err(CalcError::did_not_expect(token.content.clone())),
    }
}

/// Converts the tokens of `source` into postfix order under `mode`.
pub fn parse<S: Scanner>(mut source: S, mode: Mode, max_depth: usize) -> Result<Vec<ExprNode>> {
    if !source.is_valid() {
        return Err(CalcError::blank);
    }

    let mut is_edge = true;
    let mut yard = Yard::new(mode, max_depth);

    while let Some(token) = source.get_current() {
        let token = token.clone();
        trace!(?token, is_edge, "shunting");
        if is_edge {
            if handle_edge(&mut yard, &token)? {
                is_edge = false;
            }
        } else if handle_middle(&mut yard, &token)? {
            is_edge = true;
        }
        source.advance()?;
    }

    if is_edge {
        return Err(CalcError::abrupt_end);
    }
    yard.finish()
}

pub fn parse_str(expression_string: &str, mode: Mode, max_depth: usize) -> Result<Vec<ExprNode>> {
    parse(StringScanner::new(expression_string)?, mode, max_depth)
}

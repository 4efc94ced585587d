//! Compiles regular expressions into [NFA]s.
//!
//! The syntax knows literal characters, explicit concatenation `.`,
//! alternation `+`, intersection `&`, the postfix Kleene star `*` and
//! grouping with parentheses. `?` matches any printable ASCII character and
//! `@` matches the empty word.
//!
//! Compilation first translates the infix expression to postfix notation with
//! the shunting-yard algorithm and then evaluates the postfix expression on a
//! stack of Thompson fragments.

use crate::{automaton::nfa::NFA, error::RegexError};

/// Matches any printable ASCII character.
pub const WILDCARD: char = '?';

pub fn is_operator(c: char) -> bool {
    matches!(c, '+' | '*' | '.' | '&')
}

/// Binding strength of an operator, non-operators bind with 0.
pub fn priority(operator: char) -> u8 {
    match operator {
        '*' => 3,
        '.' => 2,
        '+' | '&' => 1,
        _ => 0,
    }
}

/// Translates an infix expression to postfix notation. Operators of equal
/// priority associate to the left, parentheses are never emitted.
///
/// The postfix `*` is written to the output right away. A `*` that does not
/// follow an operand, a `)` or another `*` is reported as missing its
/// operand.
pub fn to_postfix(regex: &str) -> Result<String, RegexError> {
    let mut postfix = String::with_capacity(regex.len());
    // operators together with the position of opening parentheses
    let mut operators: Vec<(char, usize)> = vec![];
    // true at the start, after `(` and after binary operators
    let mut expects_operand = true;

    for (position, c) in regex.chars().enumerate() {
        match c {
            '(' => {
                operators.push((c, position));
                expects_operand = true;
            }
            ')' => {
                loop {
                    match operators.pop() {
                        Some(('(', _)) => break,
                        Some((operator, _)) => postfix.push(operator),
                        None => return Err(RegexError::UnbalancedParenthesis { position }),
                    }
                }
                expects_operand = false;
            }
            '*' => {
                if expects_operand {
                    return Err(RegexError::MissingOperand { operator: c });
                }
                postfix.push(c);
            }
            c if is_operator(c) => {
                expects_operand = true;

                while let Some(&(top, _)) = operators.last() {
                    if top == '(' || priority(top) < priority(c) {
                        break;
                    }

                    postfix.push(top);
                    operators.pop();
                }

                operators.push((c, position));
            }
            c => {
                postfix.push(c);
                expects_operand = false;
            }
        }
    }

    while let Some((operator, position)) = operators.pop() {
        if operator == '(' {
            return Err(RegexError::UnbalancedParenthesis { position });
        }

        postfix.push(operator);
    }

    Ok(postfix)
}

fn pop_operand(stack: &mut Vec<NFA>, operator: char) -> Result<NFA, RegexError> {
    stack.pop().ok_or(RegexError::MissingOperand { operator })
}

/// Evaluates a postfix expression into an NFA.
pub fn from_postfix(postfix: &str) -> Result<NFA, RegexError> {
    let mut stack: Vec<NFA> = vec![];

    for c in postfix.chars() {
        let fragment = match c {
            '*' => pop_operand(&mut stack, c)?.kleene_star(),
            '+' | '.' | '&' => {
                let right = pop_operand(&mut stack, c)?;
                let left = pop_operand(&mut stack, c)?;

                match c {
                    '+' => left.union_with(&right),
                    '.' => left.concat_with(&right),
                    _ => left.intersect_with(&right),
                }
            }
            WILDCARD => NFA::from_symbols((32u8..=126).map(char::from)),
            c => NFA::literal(c),
        };

        stack.push(fragment);
    }

    match stack.len() {
        0 => Err(RegexError::Empty),
        1 => stack.pop().ok_or(RegexError::Empty),
        count => Err(RegexError::DanglingOperands { count }),
    }
}

/// Compiles a regular expression into an NFA.
///
/// ```
/// use finite_automata::{automaton::Language, regex::from_regex};
///
/// let nfa = from_regex("a.b+c*").unwrap();
/// assert!(nfa.accepts("ab"));
/// assert!(nfa.accepts("ccc"));
/// assert!(!nfa.accepts("ac"));
/// ```
pub fn from_regex(regex: &str) -> Result<NFA, RegexError> {
    let postfix = to_postfix(regex)?;
    tracing::debug!("postfix expression of {:?}: {:?}", regex, postfix);

    from_postfix(&postfix)
}

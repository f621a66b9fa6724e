use std::fmt::Display;

// A non-terminal. Besides the variables a grammar is written with, the
// transforms introduce synthetic variables tagged with where they came from,
// so fresh names can never collide with user names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    // A variable declared by the user
    Named(String),
    // `C_a`, stands in for terminal `a` inside a longer right part
    Isolated(String),
    // `D_n`, one link of the chain that splits a long right part
    Chain(u32),
    // `B_A`, collects the left recursive tails of `A`
    Tail(Box<Variable>),
    // Start variables of the algebra operators
    Union(u32),
    Concatenation(u32),
    Closure(u32),
}

impl Variable {
    pub fn named(name: impl Into<String>) -> Self {
        Variable::Named(name.into())
    }

    pub fn is_synthetic(&self) -> bool {
        !matches!(self, Variable::Named(_))
    }

    // Reads a name back the way `Display` writes it, so `D#2` is the chain
    // link and not a user variable spelled the same
    pub fn from_written(text: &str) -> Self {
        if let Some(n) = counter(text, "D#") {
            Variable::Chain(n)
        } else if let Some(n) = counter(text, "S_u#") {
            Variable::Union(n)
        } else if let Some(n) = counter(text, "S_c#") {
            Variable::Concatenation(n)
        } else if let Some(n) = counter(text, "S_v#") {
            Variable::Closure(n)
        } else if let Some(terminal) = bracketed(text, "C[").and_then(unescape) {
            Variable::Isolated(terminal)
        } else if let Some(inner) = bracketed(text, "B[") {
            Variable::Tail(Box::new(Variable::from_written(inner)))
        } else {
            Variable::named(text)
        }
    }
}

// Only the exact spelling `Display` produces, `D#01` stays a name
fn counter(text: &str, prefix: &str) -> Option<u32> {
    let digits = text.strip_prefix(prefix)?;
    digits.parse::<u32>().ok().filter(|n| n.to_string() == digits)
}

fn bracketed<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.strip_prefix(prefix)?.strip_suffix(']')
}

// Characters the text format gives a meaning to inside or around a variable
fn needs_escape(c: char) -> bool {
    c.is_whitespace() || "<>,|{}[]\\".contains(c)
}

fn escape(terminal: &str) -> String {
    terminal.chars()
        .map(|c| if needs_escape(c) { format!("\\u{{{:x}}}", u32::from(c)) } else { c.to_string() })
        .collect()
}

fn unescape(text: &str) -> Option<String> {
    let mut terminal = String::new();
    let mut rest = text;
    while let Some(start) = rest.find('\\') {
        terminal.push_str(&rest[..start]);
        let (code, after) = rest[start..].strip_prefix("\\u{")?.split_once('}')?;
        terminal.push(char::from_u32(u32::from_str_radix(code, 16).ok()?)?);
        rest = after;
    }
    terminal.push_str(rest);
    Some(terminal)
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variable::Named(name) => write!(f, "{}", name),
            Variable::Isolated(terminal) => write!(f, "C[{}]", escape(terminal)),
            Variable::Chain(n) => write!(f, "D#{}", n),
            Variable::Tail(variable) => write!(f, "B[{}]", variable),
            Variable::Union(n) => write!(f, "S_u#{}", n),
            Variable::Concatenation(n) => write!(f, "S_c#{}", n),
            Variable::Closure(n) => write!(f, "S_v#{}", n),
        }
    }
}

// The base unit of a right part
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Variable(Variable),
    Terminal(String),
}

impl Symbol {
    pub fn var(name: impl Into<String>) -> Self {
        Symbol::Variable(Variable::named(name))
    }

    pub fn term(terminal: impl Into<String>) -> Self {
        Symbol::Terminal(terminal.into())
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Symbol::Variable(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Symbol::Variable(variable) => Some(variable),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn as_terminal(&self) -> Option<&str> {
        match self {
            Symbol::Terminal(terminal) => Some(terminal),
            Symbol::Variable(_) => None,
        }
    }
}

impl From<Variable> for Symbol {
    fn from(variable: Variable) -> Self {
        Symbol::Variable(variable)
    }
}

// Variables are written between angle brackets, terminals bare
impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Variable(variable) => write!(f, "<{}>", variable),
            Symbol::Terminal(terminal) => write!(f, "{}", terminal),
        }
    }
}

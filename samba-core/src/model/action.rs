#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Argument {
    Literal(String),
    /// The bare `...` marker.
    Variadic,
}

#[derive(PartialEq, Eq, Debug)]
pub struct ActionCall {
    pub function: String,
    pub arguments: Vec<Argument>,
}

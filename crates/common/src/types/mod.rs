use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Plain `{ "mensagem": ... }` body returned by the clientes routes.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Mensagem {
    pub mensagem: String,
}

impl Mensagem {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { mensagem: msg.into() }
    }
}

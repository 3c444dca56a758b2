//! Tipo de erro unificado do pool com formatação estável.
use core::fmt;
use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::amm::error_catalog::{default_locale_message, PoolErrorCode};

const CONTEXT_VALUE_MAX: usize = 256;

/// Achata quebras de linha/tabs e trunca valores longos (com `…`).
fn sanitize_value(input: &str) -> String {
    let flat: String = input
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    if flat.chars().count() <= CONTEXT_VALUE_MAX {
        return flat;
    }
    let mut truncated: String = flat.chars().take(CONTEXT_VALUE_MAX - 1).collect();
    truncated.push('…');
    truncated
}

/// Substitui `{chave}` pelo valor do contexto; placeholders desconhecidos ficam como estão.
fn render_template(template: &str, context: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match context.get(key) {
                    Some(value) if !key.is_empty() => out.push_str(value),
                    _ => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Erro do pool com contexto estruturado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolError {
    pub code: PoolErrorCode,
    pub context: BTreeMap<String, String>,
}

impl PoolError {
    /// Cria um novo erro sem contexto adicional.
    pub fn new(code: PoolErrorCode) -> Self {
        Self {
            code,
            context: BTreeMap::new(),
        }
    }

    /// Adiciona um par chave/valor ao contexto. Chaves vazias são ignoradas.
    pub fn with_context<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        let key = key.into();
        if !key.is_empty() {
            self.context.insert(key, sanitize_value(&value.to_string()));
        }
        self
    }

    fn resolved_message(&self) -> String {
        render_template(default_locale_message(self.code), &self.context)
    }

    /// Mensagem curta para UI.
    pub fn to_user_string(&self) -> String {
        format!("[{}] {}", self.code.code(), self.resolved_message())
    }

    /// Renderiza um template arbitrário usando o contexto atual.
    pub fn render_with_template(&self, template: &str) -> String {
        render_template(template, &self.context)
    }

    /// Serialização estável em JSON para logs: `{code,title,message,context}`.
    pub fn to_log_json(&self) -> String {
        let context: Map<String, Value> = self
            .context
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        json!({
            "code": self.code.code(),
            "title": self.code.title(),
            "message": self.resolved_message(),
            "context": context,
        })
        .to_string()
    }
}

impl From<PoolErrorCode> for PoolError {
    fn from(code: PoolErrorCode) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_user_string())
    }
}

impl std::error::Error for PoolError {}

/// Resultado padrão para operações do pool e do ledger.
pub type Result<T> = std::result::Result<T, PoolError>;

#[macro_export]
macro_rules! pool_err {
  ($code:expr) => {{
    $crate::amm::error::PoolError::new($code)
  }};
  ($code:expr, $($key:ident => $value:expr),+ $(,)?) => {{
    let mut err = $crate::amm::error::PoolError::new($code);
    $(
      err = err.with_context(stringify!($key), $value);
    )+
    err
  }};
  ($code:expr, { $($key:expr => $value:expr),+ $(,)? }) => {{
    let mut err = $crate::amm::error::PoolError::new($code);
    $(
      err = err.with_context($key, $value);
    )+
    err
  }};
}

#[macro_export]
macro_rules! pool_bail {
  ($($tt:tt)*) => {
    return Err($crate::pool_err!($($tt)*))
  };
}

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::dom::{Browser, Document};
use crate::error::{Error, Result};
use crate::messages;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub const MIN_NAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Time,
    Duration,
    Weekdays,
    Name,
    Email,
    Password,
    PasswordConfirmation,
}

impl Field {
    /// Id of the input bound to the field.
    pub fn element_id(&self) -> &'static str {
        match self {
            Field::Time => "hora",
            Field::Duration => "duracao",
            Field::Weekdays => "dias",
            Field::Name => "nome",
            Field::Email => "email",
            Field::Password => "senha",
            Field::PasswordConfirmation => "confirmar_senha",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Time => write!(f, "horário"),
            Field::Duration => write!(f, "duração"),
            Field::Weekdays => write!(f, "dias da semana"),
            Field::Name => write!(f, "nome"),
            Field::Email => write!(f, "email"),
            Field::Password => write!(f, "senha"),
            Field::PasswordConfirmation => write!(f, "confirmação de senha"),
        }
    }
}

/// Input rejected before anything is sent. The message is shown to the user as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Por favor, preencha o campo {0}")]
    Missing(Field),

    #[error("Por favor, insira um email válido")]
    InvalidEmail,

    #[error("Nome deve ter pelo menos 3 caracteres")]
    NameTooShort,

    #[error("Senha deve ter pelo menos 6 caracteres")]
    PasswordTooShort,

    #[error("As senhas não coincidem")]
    PasswordMismatch,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub senha: String,
}

impl LoginForm {
    pub fn read(document: &dyn Document) -> Result<Self> {
        Ok(Self {
            email: read_field(document, Field::Email)?,
            senha: read_field(document, Field::Password)?,
        })
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        require(&self.email, Field::Email)?;
        require(&self.senha, Field::Password)?;

        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub confirmar_senha: String,
}

impl SignupForm {
    pub fn read(document: &dyn Document) -> Result<Self> {
        Ok(Self {
            nome: read_field(document, Field::Name)?,
            email: read_field(document, Field::Email)?,
            senha: read_field(document, Field::Password)?,
            confirmar_senha: read_field(document, Field::PasswordConfirmation)?,
        })
    }

    /// Checks run in a fixed order and stop at the first failure.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        require(&self.nome, Field::Name)?;
        require(&self.email, Field::Email)?;
        require(&self.senha, Field::Password)?;
        require(&self.confirmar_senha, Field::PasswordConfirmation)?;

        if self.nome.chars().count() < MIN_NAME_LENGTH {
            return Err(ValidationError::NameTooShort);
        }

        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        if self.senha.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort);
        }

        if self.senha != self.confirmar_senha {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(())
    }
}

/// Submission gate: shows the first validation message and answers whether the form
/// may be sent.
pub fn allow_submit(browser: &dyn Browser, check: std::result::Result<(), ValidationError>) -> bool {
    match check {
        Ok(()) => true,
        Err(e) => {
            browser.alert(&e.to_string());
            false
        }
    }
}

pub fn confirm_logout(browser: &dyn Browser) -> bool {
    browser.confirm(messages::CONFIRM_LOGOUT)
}

fn require(value: &str, field: Field) -> std::result::Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(())
    }
}

fn read_field(document: &dyn Document, field: Field) -> Result<String> {
    document
        .element_by_id(field.element_id())
        .map(|element| element.value())
        .ok_or_else(|| Error::missing_element(field.element_id()))
}

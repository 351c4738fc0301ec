/// Which auth form is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    /// Prompt shown next to the link to the other form.
    pub fn switch_prompt(self) -> &'static str {
        match self {
            Self::Login => "Don't have an account?",
            Self::Register => "Already have an account?",
        }
    }
}

/// Inputs and progress of the login/register forms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthFormState {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
    /// True while a login or register request is in flight.
    pub submitting: bool,
    pub focus_username_requested: bool,
}

impl AuthFormState {
    /// Both fields are required before submitting.
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

use log::{debug, info, warn};

use crate::clients::BackendClient;
use crate::error::{ClientError, Field, ValidationError};

const LOGIN_REJECTED: &str = "Username or password entered is incorrect. Try again.";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// One submit action against the backend's auth endpoints
#[derive(Debug, Clone)]
pub enum AuthRequest {
    Login(LoginForm),
    Register(RegistrationForm),
    ResetPassword(ResetPasswordForm),
}

impl AuthRequest {
    /// Value of the backend's `request` field
    pub fn request_name(&self) -> &'static str {
        match self {
            AuthRequest::Login(_) => "login",
            AuthRequest::Register(_) => "createLogin",
            AuthRequest::ResetPassword(_) => "resetPassword",
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            AuthRequest::Login(form) => require(&[
                (Field::Username, &form.username),
                (Field::Password, &form.password),
            ]),
            AuthRequest::Register(form) => {
                require(&[
                    (Field::FirstName, &form.first_name),
                    (Field::LastName, &form.last_name),
                    (Field::Username, &form.username),
                    (Field::Password, &form.password),
                    (Field::ConfirmPassword, &form.confirm_password),
                    (Field::Email, &form.email),
                ])?;
                confirm(&form.password, &form.confirm_password)
            }
            AuthRequest::ResetPassword(form) => {
                require(&[
                    (Field::FirstName, &form.first_name),
                    (Field::LastName, &form.last_name),
                    (Field::Username, &form.username),
                    (Field::Email, &form.email),
                    (Field::Password, &form.password),
                    (Field::ConfirmPassword, &form.confirm_password),
                ])?;
                confirm(&form.password, &form.confirm_password)
            }
        }
    }

    /// Form fields in the order the backend documents them.
    /// Identity fields are trimmed; passwords go out exactly as typed.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            AuthRequest::Login(form) => vec![
                ("username", form.username.trim()),
                ("password", form.password.as_str()),
            ],
            AuthRequest::Register(form) => vec![
                ("fname", form.first_name.trim()),
                ("lname", form.last_name.trim()),
                ("username", form.username.trim()),
                ("password", form.password.as_str()),
                ("email", form.email.trim()),
            ],
            AuthRequest::ResetPassword(form) => vec![
                ("fname", form.first_name.trim()),
                ("lname", form.last_name.trim()),
                ("username", form.username.trim()),
                ("email", form.email.trim()),
                ("password", form.password.as_str()),
            ],
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            AuthRequest::Login(_) => "Login successful",
            AuthRequest::Register(_) => "Account created successfully!",
            AuthRequest::ResetPassword(_) => "Password reset successfully",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            AuthRequest::Login(_) => "Login failed. Please try again.",
            AuthRequest::Register(_) => "Failed to create account",
            AuthRequest::ResetPassword(_) => "Failed to reset password",
        }
    }
}

fn require(fields: &[(Field, &String)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(ValidationError::MissingField(*field)),
        None => Ok(()),
    }
}

fn confirm(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}

/// Why a submit ended in `AuthState::Failed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// Rejected locally; no request was sent
    Invalid(ValidationError),
    /// The backend answered with an error status
    Rejected {
        message: String,
        field: Option<Field>,
    },
    /// The request itself failed or the reply was unreadable
    RequestFailed { message: String },
}

impl AuthFailure {
    pub fn message(&self) -> String {
        match self {
            AuthFailure::Invalid(e) => e.to_string(),
            AuthFailure::Rejected { message, .. } | AuthFailure::RequestFailed { message } => {
                message.clone()
            }
        }
    }

    /// The form field an inline error belongs to, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            AuthFailure::Invalid(e) => e.field(),
            AuthFailure::Rejected { field, .. } => *field,
            AuthFailure::RequestFailed { .. } => None,
        }
    }
}

/// Route a backend rejection message to the field it is about.
fn rejected_field(message: &str) -> Option<Field> {
    let message = message.to_lowercase();
    if message.contains("username already exists") {
        Some(Field::Username)
    } else if message.contains("email is already registered") {
        Some(Field::Email)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Idle,
    Validating,
    Submitting,
    Succeeded { message: String },
    Failed(AuthFailure),
}

impl AuthState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AuthState::Succeeded { .. } | AuthState::Failed(_))
    }
}

type Observer = Box<dyn Fn(&AuthState) + Send + Sync>;

/// Login, registration and password reset as one state machine.
///
/// Both terminal states accept a new submit, which starts over at
/// `Validating`. Nothing retries on its own.
pub struct AuthFlow {
    backend: BackendClient,
    state: AuthState,
    observer: Option<Observer>,
}

impl AuthFlow {
    pub fn new(backend: BackendClient) -> Self {
        AuthFlow {
            backend,
            state: AuthState::Idle,
            observer: None,
        }
    }

    /// Called with every state the flow enters
    pub fn with_observer(mut self, observer: impl Fn(&AuthState) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub async fn login(&mut self, form: LoginForm) -> AuthState {
        self.submit(AuthRequest::Login(form)).await
    }

    pub async fn register(&mut self, form: RegistrationForm) -> AuthState {
        self.submit(AuthRequest::Register(form)).await
    }

    pub async fn reset_password(&mut self, form: ResetPasswordForm) -> AuthState {
        self.submit(AuthRequest::ResetPassword(form)).await
    }

    pub async fn submit(&mut self, request: AuthRequest) -> AuthState {
        self.transition(AuthState::Validating);
        if let Err(e) = request.validate() {
            debug!("{} rejected locally: {}", request.request_name(), e);
            self.transition(AuthState::Failed(AuthFailure::Invalid(e)));
            return self.state.clone();
        }

        self.transition(AuthState::Submitting);
        let outcome = self
            .backend
            .submit(request.request_name(), &request.fields())
            .await;

        let next = match outcome {
            Ok(result) if result.is_success() => {
                info!("{} succeeded", request.request_name());
                AuthState::Succeeded {
                    message: result
                        .message
                        .unwrap_or_else(|| request.success_message().to_string()),
                }
            }
            Ok(result) => {
                info!("{} rejected by backend", request.request_name());
                AuthState::Failed(rejection(&request, result.message))
            }
            Err(e) => {
                warn!("{} request failed: {}", request.request_name(), e);
                AuthState::Failed(request_failure(&request, &e))
            }
        };

        self.transition(next);
        self.state.clone()
    }

    fn transition(&mut self, next: AuthState) {
        debug!("auth state {:?} -> {:?}", self.state, next);
        self.state = next;
        if let Some(observer) = &self.observer {
            observer(&self.state);
        }
    }
}

fn rejection(request: &AuthRequest, message: Option<String>) -> AuthFailure {
    // Login never says which half of the credentials was wrong
    if let AuthRequest::Login(_) = request {
        return AuthFailure::Rejected {
            message: LOGIN_REJECTED.to_string(),
            field: None,
        };
    }

    match message {
        Some(message) => AuthFailure::Rejected {
            field: rejected_field(&message),
            message,
        },
        None => AuthFailure::Rejected {
            message: request.failure_message().to_string(),
            field: None,
        },
    }
}

fn request_failure(request: &AuthRequest, error: &ClientError) -> AuthFailure {
    debug!("hiding cause from user: {:?}", error);
    AuthFailure::RequestFailed {
        message: request.failure_message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationForm {
        RegistrationForm {
            first_name: " John ".to_string(),
            last_name: "Doe".to_string(),
            username: "john_doe".to_string(),
            password: "12345".to_string(),
            confirm_password: "12345".to_string(),
            email: "john@example.com".to_string(),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let request = AuthRequest::Login(LoginForm {
            username: "john_doe".to_string(),
            password: "   ".to_string(),
        });
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingField(Field::Password))
        );
    }

    #[test]
    fn test_registration_password_mismatch() {
        let mut form = registration();
        form.confirm_password = "54321".to_string();
        assert_eq!(
            AuthRequest::Register(form).validate(),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_empty_field_reported_before_mismatch() {
        let mut form = registration();
        form.email = String::new();
        form.confirm_password = "other".to_string();
        assert_eq!(
            AuthRequest::Register(form).validate(),
            Err(ValidationError::MissingField(Field::Email))
        );
    }

    #[test]
    fn test_reset_password_validation() {
        let form = ResetPasswordForm {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
            password: "new".to_string(),
            confirm_password: "new".to_string(),
        };
        assert!(AuthRequest::ResetPassword(form).validate().is_ok());
    }

    #[test]
    fn test_registration_fields() {
        let request = AuthRequest::Register(registration());
        assert_eq!(request.request_name(), "createLogin");
        assert_eq!(
            request.fields(),
            vec![
                ("fname", "John"),
                ("lname", "Doe"),
                ("username", "john_doe"),
                ("password", "12345"),
                ("email", "john@example.com"),
            ]
        );
    }

    #[test]
    fn test_rejected_field_routing() {
        assert_eq!(
            rejected_field("Username already exists"),
            Some(Field::Username)
        );
        assert_eq!(
            rejected_field("Email is already registered"),
            Some(Field::Email)
        );
        assert_eq!(rejected_field("User details do not match"), None);
    }

    #[test]
    fn test_login_rejection_hides_server_message() {
        let request = AuthRequest::Login(LoginForm::default());
        let failure = rejection(&request, Some("No such user".to_string()));
        assert_eq!(failure.message(), LOGIN_REJECTED);
        assert_eq!(failure.field(), None);
    }

    #[test]
    fn test_registration_rejection_keeps_server_message() {
        let request = AuthRequest::Register(registration());
        let failure = rejection(&request, Some("Username already exists".to_string()));
        assert_eq!(failure.message(), "Username already exists");
        assert_eq!(failure.field(), Some(Field::Username));

        let failure = rejection(&request, None);
        assert_eq!(failure.message(), "Failed to create account");
    }
}

use clap::Subcommand;
use strive_core::store::session;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account and sign in
    SignUp {
        /// Account email
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Sign in with existing credentials
    SignIn {
        /// Account email
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the stored session
    SignOut,
    /// Check authentication status
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SignUp { email, password } => {
            let client = super::client()?;
            let session = super::runtime()?.block_on(client.sign_up(&email, &password))?;
            session::save_session(&session)?;
            println!("Signed in as {}", session.email);
        }
        AuthAction::SignIn { email, password } => {
            let client = super::client()?;
            let session = super::runtime()?.block_on(client.sign_in(&email, &password))?;
            session::save_session(&session)?;
            println!("Signed in as {}", session.email);
        }
        AuthAction::SignOut => {
            if let Some(s) = session::load_session()? {
                // Revoke the token best-effort; the local session is
                // cleared either way.
                if let Ok(client) = super::client() {
                    let _ = super::runtime()?.block_on(client.sign_out(&s));
                }
            }
            session::clear_session()?;
            println!("Signed out");
        }
        AuthAction::Status => match session::load_session()? {
            Some(s) => println!("authenticated as {}", s.email),
            None => println!("not authenticated"),
        },
    }
    Ok(())
}

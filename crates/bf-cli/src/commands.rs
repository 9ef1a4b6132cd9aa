use clap::Subcommand;

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Restore the session and print its state
    Status,

    /// Sign in with email and password
    SignIn {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Sign out and clear the local cache
    SignOut,

    /// Re-fetch the profile for the current identity
    RefreshProfile,
}

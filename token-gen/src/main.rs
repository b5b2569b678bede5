use clap::Parser;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

/// Generate a development access token (HS256 JWT) for the offers API.
///
/// The token only carries `sub`, `iat` and `exp`. Roles are looked up by the
/// server on every request, so the subject must exist in the `users` table.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Username to put in `sub`
    #[arg(long)]
    subject: String,

    /// Lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    ttl_seconds: i64,

    /// HS256 secret. Default: $JWT_SECRET
    #[arg(long)]
    secret: Option<String>,

    /// Override iat (unix seconds). Default: now.
    #[arg(long)]
    iat: Option<i64>,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    sub: &'a str,
    iat: i64,
    exp: i64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let secret = match args.secret {
        Some(secret) => secret,
        None => std::env::var("JWT_SECRET").map_err(|_| "pass --secret or set JWT_SECRET")?,
    };

    let iat = args.iat.unwrap_or_else(|| chrono::Utc::now().timestamp());
    let claims = Claims {
        sub: &args.subject,
        iat,
        exp: iat + args.ttl_seconds,
    };

    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    if args.quiet {
        println!("{}", token);
        return Ok(());
    }

    println!("token: {}", token);
    println!("sub: {}", claims.sub);
    println!("iat: {}", claims.iat);
    println!("exp: {}", claims.exp);
    println!("Authorization: Bearer {}", token);

    Ok(())
}

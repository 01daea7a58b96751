use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,

    pub telegram_bot_token: String,

    /// UTC hour (0-23) at which the daily reminder sweep fires.
    pub reminder_hour_utc: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN").unwrap_or_else(|_| String::new()),

            reminder_hour_utc: env::var("REMINDER_HOUR_UTC")
                .unwrap_or_else(|_| "21".into())
                .parse::<u32>()
                .expect("REMINDER_HOUR_UTC must be a number")
                .min(23),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use songbird::SerenityInit;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tunecord::{Data, Error, commands, config::Config};

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => error!("Error during startup: {}", error),
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {}", ctx.command().qualified_name, error);
            if let Err(e) = ctx.say(format!("❌ {}", error)).await {
                error!("Failed to report command error: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();

    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tunecord=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    let config = Config::from_env()?;

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let token = config.discord_token.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::list(),
            on_error: |error| Box::pin(on_error(error)),
            // Log when commands start
            pre_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "Started '{}' command from {}",
                        ctx.command().qualified_name,
                        ctx.author().name
                    )
                })
            },
            // Log when finishing commands
            post_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "Finished '{}' command from {}",
                        ctx.command().qualified_name,
                        ctx.author().name
                    )
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;
                match config.dev_guild_id {
                    Some(guild_id) => {
                        // Guild registration is instant, useful for development
                        info!("Registering commands in dev guild {}", guild_id);
                        poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
                    }
                    None => poise::builtins::register_globally(ctx, commands).await?,
                }

                info!("{} is ready!", ready.user.name);
                Ok(Data::initialise(ctx, &config).await)
            })
        });

    let mut client = ClientBuilder::new(token, intents)
        .framework(framework.build())
        .register_songbird()
        .await?;

    client.start().await.map_err(Into::into)
}

use std::io::{self, Write};
use std::sync::Arc;

use eyre::Result;
use tracing::info;
use uuid::Uuid;

use prakriti_auth::flows::establish_session;
use prakriti_auth::session::{AuthContext, Session};
use prakriti_core::models::dosha::Dosha;
use prakriti_core::models::follow_up::FollowUpKind;
use prakriti_screens::admin::{self, AdminScreen, DeleteOutcome, FollowUpForm};
use prakriti_screens::assessment::AssessmentScreen;
use prakriti_screens::error::ScreenError;
use prakriti_screens::shell::{Route, Shell};
use prakriti_shell::config::{self, ShellConfig};
use prakriti_shell::terminal::{self, StdinConfirm};
use prakriti_store::backend::Backend;
use prakriti_store::rest::RestBackend;

/// Build the REST backend and resolve the session from the configured
/// access token.
pub async fn connect() -> Result<Shell> {
    let config = config::resolve_config()?;
    let backend: Arc<dyn Backend> = Arc::new(RestBackend::new(config.store_config())?);

    let session = match config.access_token.as_deref() {
        Some(token) => {
            establish_session(&*backend, token, config.jwt_secret.as_deref()).await?
        }
        None => Session::anonymous(),
    };
    info!(
        signed_in = session.user_id().is_some(),
        admin = session.is_admin(),
        "session ready"
    );
    Ok(Shell::new(backend, Arc::new(session)))
}

pub fn config_show() -> Result<()> {
    if !config::has_config() {
        println!("No config at {}", config::config_path()?.display());
        return Ok(());
    }
    let info = config::config_info(&config::load_config()?);
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

pub fn config_set(
    url: Option<String>,
    anon_key: Option<String>,
    access_token: Option<String>,
    jwt_secret: Option<String>,
) -> Result<()> {
    let mut config = if config::has_config() {
        config::load_config()?
    } else {
        let (Some(url), Some(anon_key)) = (url.clone(), anon_key.clone()) else {
            return Err(eyre::eyre!("a new config needs both --url and --anon-key"));
        };
        ShellConfig::new(url, anon_key)
    };

    if let Some(url) = url {
        config.url = url;
    }
    if let Some(anon_key) = anon_key {
        config.anon_key = anon_key;
    }
    if access_token.is_some() {
        config.access_token = access_token;
    }
    if jwt_secret.is_some() {
        config.jwt_secret = jwt_secret;
    }
    config::save_config(&config)
}

pub async fn assess(shell: &Shell) -> Result<()> {
    let mut screen = shell.assessment();
    screen.load().await;
    if screen.total() == 0 {
        println!("No questions available.");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    loop {
        terminal::render_question(&mut out, &screen)?;
        let Some(line) = terminal::read_line(&mut input, &mut out, "> ")? else {
            return Ok(());
        };
        if !quiz_step(&mut screen, &line, &mut out).await? {
            return Ok(());
        }
        if shell.route() == Route::Schedule {
            break;
        }
    }

    writeln!(out)?;
    schedule(shell).await
}

/// Apply one line of quiz input. Returns `false` to quit.
async fn quiz_step(
    screen: &mut AssessmentScreen,
    line: &str,
    out: &mut impl Write,
) -> Result<bool> {
    match line.split_whitespace().collect::<Vec<_>>().as_slice() {
        ["q"] => return Ok(false),
        ["p"] => screen.previous(),
        ["n"] => screen.next(),
        ["g", n] => match n.parse::<usize>() {
            Ok(n) if n > 0 => screen.select_dot(n - 1),
            _ => writeln!(out, "Unknown question number: {n}")?,
        },
        ["s"] => match screen.submit().await {
            Ok(result) => writeln!(out, "Your constitution: {}", result.dominant_dosha)?,
            Err(ScreenError::Incomplete { .. }) => {
                if let Some(notice) = screen.take_notice() {
                    writeln!(out, "{}", notice.message())?;
                }
            }
            Err(e) => writeln!(out, "Submission failed: {e}")?,
        },
        [choice] => match choice.parse::<usize>() {
            Ok(n @ 1..=3) => {
                screen.choose(Dosha::ALL[n - 1]);
                screen.next();
            }
            _ => writeln!(out, "Unknown input: {choice}")?,
        },
        _ => {}
    }
    writeln!(out)?;
    Ok(true)
}

pub async fn schedule(shell: &Shell) -> Result<()> {
    let mut screen = shell.schedule();
    screen.load().await;
    terminal::render_schedule(&mut io::stdout(), &screen)?;
    Ok(())
}

/// An admin screen with accounts loaded, or `None` after printing the
/// permission notice.
async fn admin_screen(shell: &Shell) -> Option<AdminScreen> {
    let mut screen = shell.admin();
    if screen.access().is_err() {
        println!("{}", admin::PERMISSION_DENIED);
        return None;
    }
    screen.load().await;
    Some(screen)
}

pub async fn admin_users(shell: &Shell) -> Result<()> {
    if let Some(screen) = admin_screen(shell).await {
        terminal::render_accounts(&mut io::stdout(), &screen)?;
    }
    Ok(())
}

pub async fn admin_follow_ups(shell: &Shell, account: Uuid) -> Result<()> {
    if let Some(mut screen) = admin_screen(shell).await {
        screen.select(account).await?;
        terminal::render_selection(&mut io::stdout(), &screen)?;
    }
    Ok(())
}

pub async fn admin_add(
    shell: &Shell,
    account: Uuid,
    title: String,
    description: String,
    kind: FollowUpKind,
    at: String,
) -> Result<()> {
    let Some(mut screen) = admin_screen(shell).await else {
        return Ok(());
    };
    screen.select(account).await?;
    screen.toggle_form();
    *screen.form_mut() = FollowUpForm {
        title,
        description,
        kind,
        scheduled: at,
    };
    let stored = screen.create_follow_up().await?;
    println!("Created follow-up {}", stored.id);
    terminal::render_selection(&mut io::stdout(), &screen)?;
    Ok(())
}

pub async fn admin_delete(shell: &Shell, account: Uuid, follow_up: Uuid) -> Result<()> {
    let Some(mut screen) = admin_screen(shell).await else {
        return Ok(());
    };
    screen.select(account).await?;
    match screen.delete_follow_up(follow_up, &StdinConfirm).await? {
        DeleteOutcome::Cancelled => println!("Cancelled."),
        DeleteOutcome::Deleted => terminal::render_selection(&mut io::stdout(), &screen)?,
    }
    Ok(())
}

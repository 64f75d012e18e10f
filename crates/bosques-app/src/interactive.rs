//! Line-based terminal front ends for the concierge and the questionnaire.
//!
//! Both loops are generic over their input and output so tests can drive
//! them with in-memory buffers.

use std::io;

use bosques_chat::{Action, ChatError, ConciergeSession};
use bosques_core::locale;
use bosques_leads::{Field, LeadError, LeadSubmitter, PrequalifierForm, Step};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const RESET_COMMAND: &str = "/reiniciar";
const QUIT_COMMANDS: [&str; 2] = ["/salir", "/quit"];

async fn read_line<R>(input: &mut R) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

async fn write_line<W>(output: &mut W, text: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

/// Run the concierge until end of input or a quit command.
///
/// The escalation link is printed once, the first time the banner would
/// appear, and again only after a reset.
pub async fn run_chat<R, W>(
    session: &mut ConciergeSession,
    escalation_url: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    session
        .dispatch(Action::Open)
        .map_err(|e| io::Error::other(e.to_string()))?;
    if let Some(welcome) = session.state().messages().first() {
        write_line(output, &format!("Concierge: {}", welcome.text)).await?;
    }
    write_line(
        output,
        &format!("(Escriba {RESET_COMMAND} para reiniciar o /salir para terminar)"),
    )
    .await?;

    let mut announced = false;
    while let Some(line) = read_line(input).await? {
        let text = line.trim();
        if QUIT_COMMANDS.contains(&text) {
            break;
        }
        if text == RESET_COMMAND {
            session
                .dispatch(Action::Reset)
                .map_err(|e| io::Error::other(e.to_string()))?;
            announced = false;
            write_line(output, &format!("Concierge: {}", locale::WELCOME)).await?;
            continue;
        }

        match session.submit(text).await {
            Ok(reply) => {
                write_line(output, &format!("Concierge: {}", reply.text)).await?;
            }
            Err(ChatError::EmptyMessage) => continue,
            Err(e) => {
                tracing::warn!(error = %e, "Message not sent");
                continue;
            }
        }

        if session.state().show_escalation() && !announced {
            write_line(
                output,
                &format!("[{}] {}", locale::ESCALATION_LABEL, escalation_url),
            )
            .await?;
            announced = true;
        }
    }
    session
        .dispatch(Action::Close)
        .map_err(|e| io::Error::other(e.to_string()))
}

/// Ask one question until a usable answer is given. Returns `false` on end
/// of input.
async fn ask_field<R, W>(
    form: &mut PrequalifierForm,
    field: Field,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        write_line(output, field.question()).await?;
        if let Some(options) = field.options() {
            for (i, option) in options.iter().enumerate() {
                write_line(output, &format!("  {}) {}", i + 1, option)).await?;
            }
        }

        let Some(answer) = read_line(input).await? else {
            return Ok(false);
        };
        let answer = answer.trim();

        let result = match field.options() {
            Some(options) => match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => form.select(field, options[n - 1]),
                _ => form.select(field, answer),
            },
            None if answer.is_empty() => Err(LeadError::IncompleteStep(form.step().number())),
            None => form.set_text(field, answer),
        };
        match result {
            Ok(()) => return Ok(true),
            Err(e) => write_line(output, &format!("  {e}")).await?,
        }
    }
}

/// Walk the questionnaire step by step and submit it.
///
/// Returns the final form so callers can inspect the outcome; an early end
/// of input leaves it unsubmitted.
pub async fn run_prequalify<R, W>(
    submitter: &dyn LeadSubmitter,
    input: &mut R,
    output: &mut W,
) -> io::Result<PrequalifierForm>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut form = PrequalifierForm::new();

    loop {
        let step = form.step();
        write_line(
            output,
            &format!("\nPaso {} de {}: {}", step.number(), Step::COUNT, step.label()),
        )
        .await?;
        for field in step.required_fields() {
            if !ask_field(&mut form, *field, input, output).await? {
                return Ok(form);
            }
        }

        if let Err(e) = form.validate(step) {
            write_line(output, &format!("  {e}")).await?;
            continue;
        }
        if step != Step::Contact {
            form.next()
                .map_err(|e| io::Error::other(e.to_string()))?;
            continue;
        }

        write_line(output, "Enviando...").await?;
        match form.submit(submitter).await {
            Ok(()) => {
                if let Some(message) = form.success_message() {
                    write_line(output, &message).await?;
                }
                return Ok(form);
            }
            Err(e) => {
                write_line(output, &format!("No fue posible enviar: {e}")).await?;
                return Ok(form);
            }
        }
    }
}

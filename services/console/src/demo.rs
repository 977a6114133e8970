use crate::cli::QueueArgs;
use card_applications::applications::{
    render_records, ApplicationDesk, ApplicationDetails, ApplicationQueue,
    ApplicationServiceError, ApplicationStore, OutputFormat, StoreError,
};
use card_applications::config::AppConfig;
use card_applications::error::AppError;
use clap::Args;
use std::io::{self, Write};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    pub(crate) queue: QueueArgs,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut queue_config = config.queue;
    args.queue.apply(&mut queue_config);

    let mut desk = ApplicationDesk::new(ApplicationQueue::new(), &queue_config);
    let mut out = io::stdout().lock();
    render_demo(&mut out, &mut desk, queue_config.output)?;
    out.flush()?;
    Ok(())
}

fn sample_applications() -> Vec<ApplicationDetails> {
    vec![
        ApplicationDetails {
            name: "Asha Verma".to_string(),
            gender: "Female".to_string(),
            address: "Sector 21, Navi Mumbai".to_string(),
            date: "03/02/2025".to_string(),
            time: "11:20".to_string(),
            ifsc: "HDFC0000240".to_string(),
            account_number: "50100023417".to_string(),
            balance: 18250.0,
            service_type: "New Card".to_string(),
            phone: "9820098200".to_string(),
            transaction_status: "Pending".to_string(),
            pan: "AFZPK7190K".to_string(),
            aadhar: "4321 8765 2109".to_string(),
            payment_status: "Unpaid".to_string(),
        },
        ApplicationDetails {
            name: "Bharat Nair".to_string(),
            gender: "Male".to_string(),
            address: "MG Road, Kochi".to_string(),
            date: "04/02/2025".to_string(),
            time: "09:05".to_string(),
            ifsc: "FDRL0001021".to_string(),
            account_number: "50100088120".to_string(),
            balance: 5400.25,
            service_type: "Limit Increase".to_string(),
            phone: "9447012345".to_string(),
            transaction_status: "Initiated".to_string(),
            pan: "BNRPN4418D".to_string(),
            aadhar: "5566 7788 9900".to_string(),
            payment_status: "Paid".to_string(),
        },
        ApplicationDetails {
            name: "Chitra Iyer".to_string(),
            gender: "Other".to_string(),
            address: "T Nagar, Chennai".to_string(),
            date: "05/02/2025".to_string(),
            time: "16:40".to_string(),
            ifsc: "IOBA0000123".to_string(),
            account_number: "50100045003".to_string(),
            balance: 920.5,
            service_type: "Card Block".to_string(),
            phone: "9840054321".to_string(),
            transaction_status: "On Hold".to_string(),
            pan: "CIYPI2207Q".to_string(),
            aadhar: "1200 3400 5600".to_string(),
            payment_status: "Partial".to_string(),
        },
    ]
}

fn render_demo<W, S>(
    out: &mut W,
    desk: &mut ApplicationDesk<S>,
    format: OutputFormat,
) -> Result<(), AppError>
where
    W: Write,
    S: ApplicationStore,
{
    writeln!(out, "Credit card application queue demo")?;

    for details in sample_applications() {
        let record = desk.submit(details)?;
        writeln!(out, "- submitted {} for {}", record.id, record.details.name)?;
    }
    render_pending(out, desk, format, "Pending after intake")?;

    let processed = desk.process_next()?;
    writeln!(
        out,
        "\nProcessed {} for {}",
        processed.id, processed.details.name
    )?;
    render_pending(out, desk, format, "Pending after processing")?;

    let key = desk.default_key();
    let Some(value) = desk
        .pending()
        .last()
        .map(|record| record.details.field(key).to_string())
    else {
        return Ok(());
    };
    let deleted = desk.delete_by_default_key(&value)?;
    writeln!(
        out,
        "\nDeleted {} for {} (matched on {})",
        deleted.id,
        deleted.details.name,
        key.label()
    )?;
    render_pending(out, desk, format, "Pending after delete")?;

    let processed = desk.process_next()?;
    writeln!(
        out,
        "\nProcessed {} for {}",
        processed.id, processed.details.name
    )?;

    match desk.process_next() {
        Err(ApplicationServiceError::Store(StoreError::EmptyQueue)) => {
            writeln!(out, "No applications to process.")?
        }
        Ok(record) => writeln!(out, "Unexpected application {} still queued", record.id)?,
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

fn render_pending<W, S>(
    out: &mut W,
    desk: &ApplicationDesk<S>,
    format: OutputFormat,
    heading: &str,
) -> Result<(), AppError>
where
    W: Write,
    S: ApplicationStore,
{
    writeln!(out, "\n{heading} ({})", desk.len())?;
    render_records(out, format, desk.pending())?;
    Ok(())
}

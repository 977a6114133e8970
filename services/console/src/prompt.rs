use crate::menu::Console;
use card_applications::applications::{ApplicationDetails, KeyField};
use chrono::{Local, NaiveDateTime};
use std::io::{self, BufRead, Write};

fn prompt_label(field: KeyField) -> &'static str {
    match field {
        KeyField::Name => "Name",
        KeyField::Gender => "Gender",
        KeyField::Address => "Address",
        KeyField::Date => "Date (dd/mm/yyyy)",
        KeyField::Time => "Time (hh:mm)",
        KeyField::Ifsc => "IFSC Code",
        KeyField::AccountNumber => "Account Number",
        KeyField::ServiceType => "Service Type",
        KeyField::Phone => "Phone",
        KeyField::TransactionStatus => "Transaction Status",
        KeyField::Pan => "PAN",
        KeyField::Aadhar => "Aadhar",
        KeyField::PaymentStatus => "Payment Status",
    }
}

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Next line of input without its line terminator, or `None` once input is exhausted.
    pub(crate) fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub(crate) fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Ask for every field in display order.
    ///
    /// With `existing`, a blank answer keeps the current value. Without it, blank date and
    /// time answers are stamped with the current local date and time.
    pub(crate) fn collect_details(
        &mut self,
        existing: Option<&ApplicationDetails>,
    ) -> io::Result<Option<ApplicationDetails>> {
        let mut details = existing.cloned().unwrap_or_default();
        let now = self.now();

        for field in KeyField::ALL {
            let label = prompt_label(field);
            let text = match existing {
                Some(current) => format!("Enter {label} [{}]: ", current.field(field)),
                None => format!("Enter {label}: "),
            };
            let Some(answer) = self.prompt(&text)? else {
                return Ok(None);
            };

            if answer.trim().is_empty() {
                match (existing, field) {
                    (Some(_), _) => {}
                    (None, KeyField::Date) => {
                        details.date = now.format("%d/%m/%Y").to_string();
                    }
                    (None, KeyField::Time) => {
                        details.time = now.format("%H:%M").to_string();
                    }
                    (None, _) => details.set_field(field, answer),
                }
            } else {
                details.set_field(field, answer);
            }

            if field == KeyField::AccountNumber {
                match self.prompt_balance(existing.map(|current| current.balance))? {
                    Some(balance) => details.balance = balance,
                    None => return Ok(None),
                }
            }
        }

        Ok(Some(details))
    }

    fn prompt_balance(&mut self, current: Option<f64>) -> io::Result<Option<f64>> {
        let text = match current {
            Some(balance) => format!("Enter Balance [{balance:.2}]: "),
            None => "Enter Balance: ".to_string(),
        };

        loop {
            let Some(answer) = self.prompt(&text)? else {
                return Ok(None);
            };
            let answer = answer.trim();

            if answer.is_empty() {
                if let Some(balance) = current {
                    return Ok(Some(balance));
                }
            } else if let Ok(balance) = answer.parse::<f64>() {
                if balance.is_finite() {
                    return Ok(Some(balance));
                }
            }

            writeln!(self.output, "Balance must be a number.")?;
        }
    }

    fn now(&self) -> NaiveDateTime {
        self.clock
            .unwrap_or_else(|| Local::now().naive_local())
    }
}

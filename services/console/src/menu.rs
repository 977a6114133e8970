use card_applications::applications::{
    render_records, render_single, ApplicationDesk, ApplicationRecord, ApplicationServiceError,
    ApplicationStore, OutputFormat, StoreError,
};
use card_applications::error::AppError;
use chrono::NaiveDateTime;
use std::io::{BufRead, Write};

const MENU: &str = "\n===== Credit Card Application Menu =====
1. Apply for Service
2. View All Applications
3. Process Next Application
4. Search Application
5. Update Application
6. Delete Application
7. Exit
Enter your choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive menu over any line-oriented input and output.
pub(crate) struct Console<R, W> {
    pub(crate) input: R,
    pub(crate) output: W,
    format: OutputFormat,
    pub(crate) clock: Option<NaiveDateTime>,
}

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(input: R, output: W, format: OutputFormat) -> Self {
        Self {
            input,
            output,
            format,
            clock: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.clock = Some(now);
        self
    }

    /// Serve menu choices until the user exits or input runs out.
    pub(crate) fn run<S: ApplicationStore>(
        &mut self,
        desk: &mut ApplicationDesk<S>,
    ) -> Result<(), AppError> {
        loop {
            let Some(choice) = self.prompt(MENU)? else {
                writeln!(self.output)?;
                return Ok(());
            };

            let flow = match choice.trim().parse::<u8>() {
                Ok(1) => self.apply(desk)?,
                Ok(2) => self.view_all(desk)?,
                Ok(3) => self.process_next(desk)?,
                Ok(4) => self.search(desk)?,
                Ok(5) => self.update(desk)?,
                Ok(6) => self.delete(desk)?,
                Ok(7) => {
                    writeln!(self.output, "Thank you for using the Application System.")?;
                    Flow::Quit
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                self.output.flush()?;
                return Ok(());
            }
        }
    }

    fn apply<S: ApplicationStore>(
        &mut self,
        desk: &mut ApplicationDesk<S>,
    ) -> Result<Flow, AppError> {
        let Some(details) = self.collect_details(None)? else {
            return Ok(Flow::Quit);
        };

        match desk.submit(details) {
            Ok(record) => writeln!(
                self.output,
                "Application {} submitted successfully for {}.",
                record.id, record.details.name
            )?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn view_all<S: ApplicationStore>(&mut self, desk: &ApplicationDesk<S>) -> Result<Flow, AppError> {
        if desk.is_empty() {
            writeln!(self.output, "No pending applications.")?;
            return Ok(Flow::Continue);
        }

        self.heading("Pending Applications")?;
        render_records(&mut self.output, self.format, desk.pending())?;
        Ok(Flow::Continue)
    }

    fn process_next<S: ApplicationStore>(
        &mut self,
        desk: &mut ApplicationDesk<S>,
    ) -> Result<Flow, AppError> {
        match desk.process_next() {
            Ok(record) => {
                self.heading("Processed Application")?;
                self.show(&record)?;
            }
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn search<S: ApplicationStore>(&mut self, desk: &ApplicationDesk<S>) -> Result<Flow, AppError> {
        let key = desk.default_key();
        let Some(value) = self.prompt(&format!("Enter {} to search: ", key.label()))? else {
            return Ok(Flow::Quit);
        };

        match desk.find(key, &value) {
            Ok(record) => {
                self.heading("Application Found")?;
                self.show(record)?;
            }
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn update<S: ApplicationStore>(
        &mut self,
        desk: &mut ApplicationDesk<S>,
    ) -> Result<Flow, AppError> {
        let key = desk.default_key();
        let prompt = format!("Enter {} of the application to update: ", key.label());
        let Some(value) = self.prompt(&prompt)? else {
            return Ok(Flow::Quit);
        };

        let current = match desk.find(key, &value) {
            Ok(record) => record.details.clone(),
            Err(err) => {
                self.report(err)?;
                return Ok(Flow::Continue);
            }
        };

        writeln!(self.output, "Press Enter to keep the current value.")?;
        let Some(details) = self.collect_details(Some(&current))? else {
            return Ok(Flow::Quit);
        };

        match desk.update(key, &value, details) {
            Ok(record) => writeln!(
                self.output,
                "Application {} updated successfully.",
                record.id
            )?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn delete<S: ApplicationStore>(
        &mut self,
        desk: &mut ApplicationDesk<S>,
    ) -> Result<Flow, AppError> {
        let key = desk.default_key();
        let prompt = format!("Enter {} of the application to delete: ", key.label());
        let Some(value) = self.prompt(&prompt)? else {
            return Ok(Flow::Quit);
        };

        match desk.delete(key, &value) {
            Ok(record) => writeln!(
                self.output,
                "Application {} for {} deleted.",
                record.id, record.details.name
            )?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    /// Section banner; JSON and CSV output stays bare so it can be piped.
    fn heading(&mut self, title: &str) -> Result<(), AppError> {
        if self.format == OutputFormat::Text {
            writeln!(self.output, "\n--- {title} ---")?;
        }
        Ok(())
    }

    fn show(&mut self, record: &ApplicationRecord) -> Result<(), AppError> {
        render_single(&mut self.output, self.format, record)?;
        Ok(())
    }

    fn report(&mut self, err: ApplicationServiceError) -> Result<(), AppError> {
        match err {
            ApplicationServiceError::Store(StoreError::EmptyQueue) => {
                writeln!(self.output, "No applications to process.")?
            }
            ApplicationServiceError::Store(StoreError::NotFound { field, value }) => writeln!(
                self.output,
                "No application found with {} '{}'.",
                field.label(),
                value
            )?,
            ApplicationServiceError::Store(StoreError::OutOfMemory) => {
                writeln!(self.output, "Memory allocation failed.")?
            }
            ApplicationServiceError::Intake(err) => {
                writeln!(self.output, "Application rejected: {err}.")?
            }
        }
        Ok(())
    }
}

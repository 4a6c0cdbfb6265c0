use std::error::Error;

use snafu::CleanedErrorText;

pub trait ErrorExt {
    /// The error and its sources on one line, separated by `: `.
    fn chained_message(&self) -> String;
}

impl<E: Error> ErrorExt for E {
    fn chained_message(&self) -> String {
        CleanedErrorText::new(self)
            .map(|(_, text, _)| text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(": ")
    }
}

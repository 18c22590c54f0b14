//! Interactive prompts
//!
//! Every question is a validated retry loop: invalid input prints an error
//! and asks again. End of input yields `None` so the session can finish.

use std::io::{self, BufRead, Write};

use crate::core::{City, DayFilter, Filter, MonthFilter};

pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    fn read_answer(&mut self, question: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "\n{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    /// Ask until `parse` accepts the answer
    fn ask<T>(
        &mut self,
        question: &str,
        error: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.read_answer(question)? else {
                return Ok(None);
            };
            if let Some(value) = parse(&answer) {
                return Ok(Some(value));
            }
            writeln!(self.output, "*** {error} ***")?;
        }
    }

    pub(crate) fn greet(&mut self) -> io::Result<()> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")
    }

    /// City plus a month filter, a day filter, or neither
    pub(crate) fn ask_filters(&mut self) -> io::Result<Option<(City, Filter)>> {
        let Some(city) = self.ask(
            "Would you like to see data for Chicago, New York City or Washington?",
            "Please input a valid city name: Chicago, New York City or Washington",
            |s| City::parse(s).ok(),
        )?
        else {
            return Ok(None);
        };

        let Some(kind) = self.ask(
            "Would you like to filter the data by month, day or not at all? Please input month, day or none.",
            "Please choose from month, day or none.",
            |s| matches!(s, "month" | "day" | "none").then(|| s.to_string()),
        )?
        else {
            return Ok(None);
        };

        let filter = match kind.as_str() {
            "month" => self
                .ask(
                    "Select a month: January, February, March, April, May or June?",
                    "Please input January, February, March, April, May or June",
                    |s| match MonthFilter::parse(s) {
                        Ok(MonthFilter::Month(m)) => Some(MonthFilter::Month(m)),
                        _ => None,
                    },
                )?
                .map(|month| Filter::new(month, DayFilter::All)),
            "day" => self
                .ask(
                    "Select a day: Monday, Tuesday, Wednesday, Thursday, Friday, Saturday or Sunday?",
                    "Please input Monday, Tuesday, Wednesday, Thursday, Friday, Saturday or Sunday",
                    |s| match DayFilter::parse(s) {
                        Ok(DayFilter::Day(d)) => Some(DayFilter::Day(d)),
                        _ => None,
                    },
                )?
                .map(|day| Filter::new(MonthFilter::All, day)),
            _ => Some(Filter::default()),
        };

        writeln!(self.output, "{}", "-".repeat(40))?;
        Ok(filter.map(|f| (city, f)))
    }

    /// yes → true, no → false
    pub(crate) fn confirm(&mut self, question: &str) -> io::Result<Option<bool>> {
        self.ask(question, "Please enter yes or no.", |s| match s {
            "yes" | "y" => Some(true),
            "no" | "n" => Some(false),
            _ => None,
        })
    }

    pub(crate) fn output(&mut self) -> &mut W {
        &mut self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(p: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&p.output).into_owned()
    }

    #[test]
    fn no_filter() {
        let mut p = prompter("Chicago\nnone\n");
        let (city, filter) = p.ask_filters().unwrap().unwrap();
        assert_eq!(city, City::Chicago);
        assert_eq!(filter, Filter::default());
    }

    #[test]
    fn month_filter_resets_day() {
        let mut p = prompter("new york city\nmonth\nMarch\n");
        let (city, filter) = p.ask_filters().unwrap().unwrap();
        assert_eq!(city, City::NewYorkCity);
        assert_eq!(filter, Filter::new(MonthFilter::Month(3), DayFilter::All));
    }

    #[test]
    fn day_filter_resets_month() {
        let mut p = prompter("washington\nday\nsunday\n");
        let (_, filter) = p.ask_filters().unwrap().unwrap();
        assert_eq!(filter, Filter::new(MonthFilter::All, DayFilter::Day(Weekday::Sun)));
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let mut p = prompter("boston\nchicago\nweek\nmonth\nall\njuly\njune\n");
        let (city, filter) = p.ask_filters().unwrap().unwrap();
        assert_eq!(city, City::Chicago);
        assert_eq!(filter.month, MonthFilter::Month(6));
        let out = printed(&p);
        assert!(out.contains("Please input a valid city name"));
        assert!(out.contains("Please choose from month, day or none."));
        assert_eq!(out.matches("Please input January").count(), 2);
    }

    #[test]
    fn end_of_input_stops() {
        let mut p = prompter("chicago\n");
        assert!(p.ask_filters().unwrap().is_none());
        let mut p = prompter("");
        assert!(p.confirm("Restart?").unwrap().is_none());
    }

    #[test]
    fn confirm_accepts_yes_and_no() {
        let mut p = prompter("maybe\nYES\nno\n");
        assert_eq!(p.confirm("Continue?").unwrap(), Some(true));
        assert_eq!(p.confirm("Continue?").unwrap(), Some(false));
        assert!(printed(&p).contains("Please enter yes or no."));
    }
}

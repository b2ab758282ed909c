use crate::{
    error::fmt::pattern::FormatError as FE,
    fmt::{
        pattern::{BrokenDownTime, Directive, Item, Meridiem},
        util::{DecimalFormatter, FractionalFormatter},
        Write, WriteExt,
    },
    Error,
};

pub(super) struct Formatter<'p, 't, 'w, W> {
    pub(super) items: &'p [Item],
    pub(super) tm: &'t BrokenDownTime,
    pub(super) wtr: &'w mut W,
}

impl<'p, 't, 'w, W: Write> Formatter<'p, 't, 'w, W> {
    pub(super) fn format(&mut self) -> Result<(), Error> {
        for item in self.items {
            match *item {
                Item::Literal(ref text) => self.wtr.write_str(text)?,
                Item::Field(directive) => self.format_one(directive)?,
            }
        }
        Ok(())
    }

    fn format_one(&mut self, directive: Directive) -> Result<(), Error> {
        match directive {
            Directive::Year { width: 2 } => {
                let year = required(self.tm.year, "a year")?;
                self.write_padded(2, i64::from(year).rem_euclid(100))
            }
            Directive::Year { width } => {
                let year = required(self.tm.year, "a year")?;
                self.write_padded(width, year)
            }
            Directive::Month { width } => {
                self.write_padded(width, required(self.tm.month, "a month")?)
            }
            Directive::Day { width } => {
                self.write_padded(width, required(self.tm.day, "a day")?)
            }
            Directive::Hour { width } => {
                self.write_padded(width, self.hour()?)
            }
            Directive::ClockHour { width } => {
                let hour = self.hour()? % 12;
                self.write_padded(width, if hour == 0 { 12 } else { hour })
            }
            Directive::AmPm => {
                self.wtr.write_str(Meridiem::from_hour(self.hour()?).as_str())
            }
            Directive::Minute { width } => {
                self.write_padded(width, required(self.tm.minute, "a minute")?)
            }
            Directive::Second { width } => {
                self.write_padded(width, required(self.tm.second, "a second")?)
            }
            Directive::Fraction { digits } => {
                let subsec =
                    required(self.tm.subsec, "a fractional second")?;
                let formatter = FractionalFormatter::new().precision(digits);
                self.wtr.write_fraction(&formatter, subsec)
            }
        }
    }

    fn hour(&self) -> Result<i8, Error> {
        required(self.tm.hour(), "an hour")
    }

    fn write_padded(
        &mut self,
        width: u8,
        n: impl Into<i64>,
    ) -> Result<(), Error> {
        let formatter = DecimalFormatter::new().padding(width);
        self.wtr.write_int(&formatter, n)
    }
}

fn required<T>(field: Option<T>, name: &'static str) -> Result<T, Error> {
    field.ok_or_else(|| Error::from(FE::MissingField { field: name }))
}

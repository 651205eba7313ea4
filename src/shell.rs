//! Interactive menu session over an [`Analyzer`].
//!
//! All session state lives in [`Shell`]; input and output are injected so the
//! menus can be driven from a script.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::analyzers::analyzer::Analyzer;
use crate::analyzers::types::{Category, NumericField};
use crate::analyzers::utility::pct;
use crate::output::{
    fmt_pct, format_distribution, format_numeric_stats, format_rates, format_record,
    format_record_table, format_service_ratings, format_subset, thousands,
};

/// Number of records shown by the sample view.
const SAMPLE_SIZE: usize = 10;

const MAIN_MENU: &[&str] = &[
    "Dataset Overview",
    "Demographics Analysis",
    "Flight Statistics",
    "Service Ratings Analysis",
    "Satisfaction Analysis",
    "Search & Filter Records",
    "Generate Comprehensive Report",
];

const DEMOGRAPHICS_MENU: &[&str] = &[
    "Gender Distribution",
    "Customer Type Distribution",
    "Age Statistics",
    "Age Group Distribution",
];

const FLIGHT_MENU: &[&str] = &[
    "Travel Type Distribution",
    "Travel Class Distribution",
    "Flight Distance Statistics",
    "Flight Distance Categories",
    "Departure Delay Statistics",
    "Arrival Delay Statistics",
    "Longest Flight",
];

const SERVICE_MENU: &[&str] = &["All Service Average Ratings", "Top & Bottom Rated Services"];

const SATISFACTION_MENU: &[&str] = &[
    "Overall Satisfaction Distribution",
    "Satisfaction by Travel Class",
    "Satisfaction by Customer Type",
    "Satisfaction by Travel Type",
    "Satisfaction by Age Group",
];

const SEARCH_MENU: &[&str] = &[
    "Search by Passenger ID",
    "Filter by Travel Class",
    "Filter by Age Range",
    "Search by Flight Date",
    "View Sample Records (First 10)",
];

/// Whether the session keeps going after a menu returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Reads a number or ends the session on end of input.
macro_rules! choose {
    ($shell:expr, $prompt:expr) => {
        match $shell.read_number($prompt)? {
            Some(n) => n,
            None => return Ok(Flow::Quit),
        }
    };
}

pub struct Shell<'a, R, W> {
    analyzer: Analyzer<'a>,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(analyzer: Analyzer<'a>, input: R, out: W) -> Self {
        Self {
            analyzer,
            input,
            out,
        }
    }

    /// Runs the main menu until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "\nAIRLINE PASSENGER SATISFACTION DATA PROCESSING SYSTEM"
        )?;
        writeln!(
            self.out,
            "Total records: {}",
            thousands(self.analyzer.total_records())
        )?;

        while self.main_menu()? == Flow::Continue {}

        writeln!(self.out, "\nGoodbye!")?;
        self.out.flush()
    }

    fn main_menu(&mut self) -> io::Result<Flow> {
        self.print_menu("MAIN MENU", MAIN_MENU, "Exit")?;
        let choice = choose!(self, "Enter your choice: ");
        debug!(choice, "Main menu selection");

        match choice {
            1 => self.overview()?,
            2 => return self.demographics_menu(),
            3 => return self.flight_menu(),
            4 => return self.service_menu(),
            5 => return self.satisfaction_menu(),
            6 => return self.search_menu(),
            7 => {
                let report = self.analyzer.comprehensive_report();
                write!(self.out, "\n{report}")?;
            }
            0 => return Ok(Flow::Quit),
            _ => self.invalid()?,
        }
        Ok(Flow::Continue)
    }

    fn demographics_menu(&mut self) -> io::Result<Flow> {
        loop {
            self.print_menu(
                "DEMOGRAPHICS ANALYSIS",
                DEMOGRAPHICS_MENU,
                "Back to Main Menu",
            )?;
            match choose!(self, "Enter your choice: ") {
                1 => self.distribution(Category::Gender)?,
                2 => self.distribution(Category::CustomerType)?,
                3 => self.numeric(NumericField::Age)?,
                4 => self.distribution(Category::AgeGroup)?,
                0 => return Ok(Flow::Continue),
                _ => self.invalid()?,
            }
        }
    }

    fn flight_menu(&mut self) -> io::Result<Flow> {
        loop {
            self.print_menu("FLIGHT STATISTICS", FLIGHT_MENU, "Back to Main Menu")?;
            match choose!(self, "Enter your choice: ") {
                1 => self.distribution(Category::TravelType)?,
                2 => self.distribution(Category::TravelClass)?,
                3 => self.numeric(NumericField::FlightDistance)?,
                4 => self.distribution(Category::DistanceCategory)?,
                5 => self.numeric(NumericField::DepartureDelay)?,
                6 => self.numeric(NumericField::ArrivalDelay)?,
                7 => match self.analyzer.longest_flight() {
                    Some(r) => write!(self.out, "\nLongest Flight:\n{}", format_record(r))?,
                    None => writeln!(self.out, "\n  No data.")?,
                },
                0 => return Ok(Flow::Continue),
                _ => self.invalid()?,
            }
        }
    }

    fn service_menu(&mut self) -> io::Result<Flow> {
        loop {
            self.print_menu(
                "SERVICE RATINGS ANALYSIS",
                SERVICE_MENU,
                "Back to Main Menu",
            )?;
            match choose!(self, "Enter your choice: ") {
                1 => {
                    let text = format_service_ratings(
                        &self.analyzer.average_service_ratings(),
                        self.analyzer.overall_average_rating(),
                    );
                    write!(self.out, "{text}")?;
                }
                2 => {
                    writeln!(
                        self.out,
                        "\n════════════ SERVICE RANKING SUMMARY ════════════"
                    )?;
                    match self.analyzer.service_ranking() {
                        Some(ranking) => write!(self.out, "{ranking}")?,
                        None => writeln!(self.out, "  No data.")?,
                    }
                }
                0 => return Ok(Flow::Continue),
                _ => self.invalid()?,
            }
        }
    }

    fn satisfaction_menu(&mut self) -> io::Result<Flow> {
        loop {
            self.print_menu(
                "SATISFACTION ANALYSIS",
                SATISFACTION_MENU,
                "Back to Main Menu",
            )?;
            match choose!(self, "Enter your choice: ") {
                1 => self.distribution(Category::Satisfaction)?,
                2 => self.rates(Category::TravelClass)?,
                3 => self.rates(Category::CustomerType)?,
                4 => self.rates(Category::TravelType)?,
                5 => self.rates(Category::AgeGroup)?,
                0 => return Ok(Flow::Continue),
                _ => self.invalid()?,
            }
        }
    }

    fn search_menu(&mut self) -> io::Result<Flow> {
        loop {
            self.print_menu("SEARCH & FILTER", SEARCH_MENU, "Back to Main Menu")?;
            match choose!(self, "Enter your choice: ") {
                1 => {
                    let Some(id) = self.read_text("Enter Passenger ID to search: ")? else {
                        return Ok(Flow::Quit);
                    };
                    writeln!(self.out, "\n════════════ SEARCH RESULT ════════════")?;
                    match self.analyzer.find_by_id(&id) {
                        Some(r) => write!(self.out, "  Passenger Found!\n{}", format_record(r))?,
                        None => writeln!(self.out, "  No passenger found with ID: {id}")?,
                    }
                }
                2 => {
                    writeln!(self.out, "\nAvailable Classes: Business, Eco, Eco Plus")?;
                    let Some(class) = self.read_text("Enter travel class to filter: ")? else {
                        return Ok(Flow::Quit);
                    };
                    let hits = self.analyzer.filter_by_class(&class);
                    let summary = self.analyzer.subset_summary(&hits);
                    let text = format_subset(&format!("Records in '{class}' class"), &summary);
                    write!(self.out, "{text}")?;
                }
                3 => {
                    let min = choose!(self, "Enter minimum age: ");
                    let max = choose!(self, "Enter maximum age: ");
                    let hits = self.analyzer.filter_by_age_range(min, max);
                    let summary = self.analyzer.subset_summary(&hits);
                    let text = format_subset(&format!("Passengers aged {min}-{max}"), &summary);
                    write!(self.out, "{text}")?;
                }
                4 => {
                    let Some(date) = self.read_text("Enter flight date: ")? else {
                        return Ok(Flow::Quit);
                    };
                    let hits = self.analyzer.find_by_date(&date);
                    writeln!(self.out, "\n  Flights on {date}: {}", thousands(hits.len()))?;
                    if !hits.is_empty() {
                        let table = format_record_table(hits.iter().copied().take(SAMPLE_SIZE));
                        write!(self.out, "{table}")?;
                    }
                }
                5 => {
                    writeln!(
                        self.out,
                        "\n════════════ SAMPLE RECORDS (First 10) ════════════"
                    )?;
                    let table = format_record_table(self.analyzer.sample(SAMPLE_SIZE));
                    write!(self.out, "{table}")?;
                }
                0 => return Ok(Flow::Continue),
                _ => self.invalid()?,
            }
        }
    }

    fn overview(&mut self) -> io::Result<()> {
        let total = self.analyzer.total_records();
        let satisfied = self.analyzer.count_satisfied();

        writeln!(self.out, "\n════════════ DATASET OVERVIEW ════════════")?;
        writeln!(self.out, "  Total Records: {}", thousands(total))?;
        writeln!(self.out, "\n  Data Columns:")?;
        writeln!(self.out, "  ├─ Identification: ID")?;
        writeln!(self.out, "  ├─ Demographics: Gender, Customer Type, Age")?;
        writeln!(
            self.out,
            "  ├─ Travel Info: Type of Travel, Class, Flight Distance, Date"
        )?;
        writeln!(
            self.out,
            "  ├─ Service Ratings (0-5): 14 different services"
        )?;
        writeln!(self.out, "  ├─ Delays: Departure Delay, Arrival Delay")?;
        writeln!(self.out, "  └─ Outcome: Satisfaction")?;
        writeln!(self.out, "\n  Quick Statistics:")?;
        writeln!(
            self.out,
            "  ├─ Satisfied: {} ({})",
            thousands(satisfied),
            fmt_pct(pct(satisfied, total))
        )?;
        writeln!(
            self.out,
            "  └─ Dissatisfied: {} ({})",
            thousands(total - satisfied),
            fmt_pct(pct(total - satisfied, total))
        )
    }

    fn distribution(&mut self, category: Category) -> io::Result<()> {
        let dist = self.analyzer.distribution_by(category);
        let title = format!("{} DISTRIBUTION", category.label().to_uppercase());
        write!(self.out, "{}", format_distribution(&title, &dist))
    }

    fn numeric(&mut self, field: NumericField) -> io::Result<()> {
        let stats = self.analyzer.numeric_stats(field);
        write!(self.out, "{}", format_numeric_stats(field, stats.as_ref()))
    }

    fn rates(&mut self, category: Category) -> io::Result<()> {
        let rates = self.analyzer.satisfaction_rate_by(category);
        let title = format!("SATISFACTION BY {}", category.label().to_uppercase());
        write!(self.out, "{}", format_rates(&title, &rates))
    }

    fn invalid(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nInvalid choice. Please try again.")
    }

    fn print_menu(&mut self, title: &str, items: &[&str], back: &str) -> io::Result<()> {
        writeln!(self.out, "\n┌──────────────────────────────────────────┐")?;
        writeln!(self.out, "│  {title:<40}│")?;
        writeln!(self.out, "├──────────────────────────────────────────┤")?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.out, "│  {}. {:<37}│", i + 1, item)?;
        }
        writeln!(self.out, "│  0. {back:<37}│")?;
        writeln!(self.out, "└──────────────────────────────────────────┘")
    }

    /// One trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        self.read_line()
    }

    /// Prompts until a non-negative integer is entered.
    fn read_number(&mut self, prompt: &str) -> io::Result<Option<u32>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.parse() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => {
                    write!(self.out, "Please enter a valid number: ")?;
                    self.out.flush()?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::record::tests::record;

    fn run_script(data: &Dataset, script: &str) -> String {
        let mut out = Vec::new();
        Shell::new(Analyzer::new(data), script.as_bytes(), &mut out)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn data() -> Dataset {
        let mut a = record("PAX1");
        a.gender = "Male".into();
        a.satisfaction = "satisfied".into();
        a.travel_class = "Business".into();
        a.age = 30;
        Dataset::from(vec![a, record("PAX2")])
    }

    #[test]
    fn test_exit_immediately() {
        let text = run_script(&data(), "0\n");
        assert!(text.contains("MAIN MENU"));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let text = run_script(&data(), "2\n");
        assert!(text.contains("DEMOGRAPHICS ANALYSIS"));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let text = run_script(&data(), "abc\n9\n0\n");
        assert!(text.contains("Please enter a valid number"));
        assert!(text.contains("Invalid choice"));
    }

    #[test]
    fn test_gender_distribution_from_submenu() {
        let text = run_script(&data(), "2\n1\n0\n0\n");
        assert!(text.contains("GENDER DISTRIBUTION"));
        assert!(text.contains("Male"));
        assert!(text.contains("Total: 2"));
    }

    #[test]
    fn test_search_by_id() {
        let text = run_script(&data(), "6\n1\nPAX2\n1\nNOPE\n0\n0\n");
        assert!(text.contains("Passenger Found!"));
        assert!(text.contains("ID: PAX2"));
        assert!(text.contains("No passenger found with ID: NOPE"));
    }

    #[test]
    fn test_filters() {
        let text = run_script(&data(), "6\n2\nbusiness\n3\n30\n30\n0\n0\n");
        assert!(text.contains("Records in 'business' class: 1"));
        assert!(text.contains("Passengers aged 30-30: 1"));
        assert!(text.contains("Satisfied: 1 (100.0%)"));
    }

    #[test]
    fn test_report_and_rates() {
        let text = run_script(&data(), "5\n2\n0\n7\n0\n");
        assert!(text.contains("SATISFACTION BY TRAVEL CLASS"));
        assert!(text.contains("DATA SUMMARY"));
    }

    #[test]
    fn test_empty_dataset_does_not_panic() {
        let data = Dataset::default();
        let text = run_script(&data, "1\n3\n3\n5\n7\n0\n4\n2\n0\n7\n0\n");
        assert!(text.contains("No data."));
        assert!(!text.contains("NaN"));
    }
}

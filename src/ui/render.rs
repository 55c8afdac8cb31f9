//! Human-readable rendering of workers, sessions and reports.

use crate::models::report::{DailyReport, WeeklyReport};
use crate::models::session::Session;
use crate::models::worker::Worker;
use crate::utils::colors::{colorize_in_out, colorize_optional};
use crate::utils::table::{Column, Table};
use crate::utils::time::{clock, format_hours};

pub fn workers_table(workers: &[Worker], sep: char) -> String {
    let mut t = Table::new(
        vec![
            Column::new("ID", 3),
            Column::new("HANDLE", 12),
            Column::new("NAME", 12),
        ],
        sep,
    );
    for w in workers {
        t.add_row(vec![
            w.id.to_string(),
            w.handle.clone(),
            w.display_name.clone(),
        ]);
    }
    t.render()
}

pub fn sessions_table(sessions: &[Session], sep: char) -> String {
    let mut t = Table::new(
        vec![
            Column::new("ID", 3),
            Column::new("DATE", 10),
            Column::new("IN", 8),
            Column::new("OUT", 8),
            Column::new("HOURS", 5),
        ],
        sep,
    );
    for s in sessions {
        let hours = if s.is_open() {
            colorize_optional("--:--:--")
        } else {
            format_hours(s.worked_hours())
        };
        t.add_row(vec![
            s.id.to_string(),
            s.day().to_string(),
            colorize_in_out(&clock(Some(&s.start_time)), true),
            colorize_in_out(&clock(s.end_time.as_ref()), false),
            hours,
        ]);
    }
    t.render()
}

pub fn session_line(s: &Session) -> String {
    match s.end_time {
        Some(end) => format!(
            "#{} {} {} → {} ({}h)",
            s.id,
            s.day(),
            clock(Some(&s.start_time)),
            clock(Some(&end)),
            format_hours(s.worked_hours())
        ),
        None => format!("#{} {} {} → (open)", s.id, s.day(), clock(Some(&s.start_time))),
    }
}

pub fn weekly_table(report: &WeeklyReport, sep: char) -> String {
    let mut t = Table::new(
        vec![
            Column::new("DAY", 9),
            Column::new("DATE", 10),
            Column::new("IN", 8),
            Column::new("OUT", 8),
        ],
        sep,
    );
    for d in &report.days {
        t.add_row(vec![
            d.day.clone(),
            d.date.to_string(),
            colorize_in_out(&clock(d.start_time.as_ref()), true),
            colorize_in_out(&clock(d.end_time.as_ref()), false),
        ]);
    }

    let mut out = t.render();
    out.push_str(&format!("Total hours: {}\n", report.total_hours));
    out
}

pub fn daily_text(report: &DailyReport) -> String {
    let d = &report.summary;
    format!(
        "{} {}: first IN {} | first OUT {} | sessions {} | total {}h\n",
        d.day,
        d.date,
        colorize_in_out(&clock(d.start_time.as_ref()), true),
        colorize_in_out(&clock(d.end_time.as_ref()), false),
        report.sessions,
        report.total_hours
    )
}

// src/services/labels.rs
//
// Rótulos de eixo compartilhados pelos gráficos.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

// "Jan 01", "Dec 25"
pub fn day(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

// Os 24 rótulos fixos do histograma horário: "12 AM" .. "11 PM".
pub fn hour(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h12} {suffix}")
}

// "9AM", "5PM" (minutos não aparecem na grade de escala).
pub fn clock(time: NaiveTime) -> String {
    let h = time.hour();
    let suffix = if h < 12 { "AM" } else { "PM" };
    let h12 = match h % 12 {
        0 => 12,
        x => x,
    };
    format!("{h12}{suffix}")
}

// Chave semanal "W<semana ISO> <ano ISO>", ex.: "W23 2024".
pub fn iso_week(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("W{} {}", week.week(), week.year())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyHistory {
    pub date: String, // YYYY-MM-DD
    pub day_of_week: String, // Mon, Tue...
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyHistory {
    pub year: i32,
    pub week: u32,
    pub days: Vec<DailyHistory>,
    pub total_hours: f64,
}

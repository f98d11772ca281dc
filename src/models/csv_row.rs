/// One rendered output row, fields already in header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    /// 1-based position in the output, unrelated to any source identifier
    pub id: usize,
    pub values: Vec<String>,
    pub recorded_at: String,
    pub location: String,
}

impl CsvRow {
    pub fn new(id: usize, values: Vec<String>, recorded_at: String, location: String) -> Self {
        Self {
            id,
            values,
            recorded_at,
            location,
        }
    }

    /// Flatten into the record layout `id, values.., recorded_at, location`
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(self.values.len() + 3);
        record.push(self.id.to_string());
        record.extend(self.values.iter().cloned());
        record.push(self.recorded_at.clone());
        record.push(self.location.clone());
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_order() {
        let row = CsvRow::new(
            3,
            vec!["12.5".to_string(), String::new()],
            "2025-10-22 09:15:00".to_string(),
            "서울시".to_string(),
        );

        assert_eq!(
            row.to_record(),
            vec!["3", "12.5", "", "2025-10-22 09:15:00", "서울시"]
        );
    }
}

/// Numeric table identifier. Starts at 1 and only ever increases.
pub type TableId = u32;

pub const FIRST_TABLE: TableId = 1;

/// Zero-padded display form used in titles and exported table records.
pub fn table_number(id: TableId) -> String {
    format!("{id:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_number_is_zero_padded() {
        assert_eq!(table_number(1), "01");
        assert_eq!(table_number(12), "12");
        assert_eq!(table_number(123), "123");
    }
}

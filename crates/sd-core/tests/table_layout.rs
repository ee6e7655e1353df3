//! Markdown tables keep one line per row and a fixed column count
//! whatever text the backend puts in a cell.

use proptest::prelude::*;
use sd_core::output::MdTable;

fn separators(line: &str) -> usize {
    let mut count = 0;
    let mut prev = None;
    for c in line.chars() {
        if c == '|' && prev != Some('\\') {
            count += 1;
        }
        prev = Some(c);
    }
    count
}

fn cell() -> impl Strategy<Value = String> {
    "[a-z 가-힣|\\\\\r\n]{0,12}"
}

proptest! {
    #[test]
    fn rows_stay_on_one_line(
        headers in prop::collection::vec(cell(), 1..5),
        rows in prop::collection::vec(prop::collection::vec(cell(), 0..7), 0..5),
    ) {
        let mut table = MdTable::new(headers.clone());
        for row in &rows {
            table.row(row.clone());
        }
        let rendered = table.render();
        let lines: Vec<&str> = rendered.split('\n').filter(|l| !l.is_empty()).collect();
        prop_assert_eq!(lines.len(), rows.len() + 2);
        for line in lines {
            prop_assert_eq!(separators(line), headers.len() + 1, "line: {:?}", line);
        }
    }
}

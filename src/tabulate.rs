use prettytable::{format, Cell, Row, Table};

/// Anything the view actions can render as a console table: a fixed title
/// row plus one row of cells per record.
pub trait Tabular {
    fn titles() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// Render a listing on stdout.  An empty listing still prints the title row,
/// which tells the operator the query ran and matched nothing.
pub fn print_table<T: Tabular>(records: &[T]) {
    render(records).printstd();
}

fn render<T: Tabular>(records: &[T]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(T::titles().iter().map(|t| Cell::new(t)).collect()));

    for record in records {
        table.add_row(Row::new(record.row().iter().map(|v| Cell::new(v)).collect()));
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        left: String,
        right: String,
    }

    impl Tabular for Pair {
        fn titles() -> &'static [&'static str] {
            &["left", "right"]
        }

        fn row(&self) -> Vec<String> {
            vec![self.left.clone(), self.right.clone()]
        }
    }

    #[test]
    fn one_table_row_per_record() {
        let records = vec![
            Pair {
                left: String::from("a"),
                right: String::from("b"),
            },
            Pair {
                left: String::from("c"),
                right: String::from("d"),
            },
        ];

        assert_eq!(render(&records).len(), 2);
    }

    #[test]
    fn empty_listing_renders_titles_only() {
        let records: Vec<Pair> = Vec::new();
        let table = render(&records);
        assert_eq!(table.len(), 0);
        assert!(table.to_string().contains("left"));
    }
}

//! Lightweight inspection of migration script text.

/// Statements that would end or restart the batch transaction from inside a script.
const TRANSACTION_CONTROL: &[&str] = &["BEGIN", "START", "COMMIT", "END", "ROLLBACK", "ABORT"];

/// Return the first transaction-control keyword that opens a statement in `sql`.
///
/// Statements are split on `;` outside of quoted strings, quoted identifiers
/// and comments, so `'a; commit'` or `-- commit` do not count.
pub fn transaction_control_keyword(sql: &str) -> Option<&'static str> {
    let mut chars = sql.char_indices().peekable();
    let mut at_statement_start = true;

    while let Some((start, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            ';' => at_statement_start = true,
            '-' if chars.peek().map(|&(_, n)| n) == Some('-') => {
                for (_, n) in chars.by_ref() {
                    if n == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek().map(|&(_, n)| n) == Some('*') => {
                chars.next();
                let mut prev = ' ';
                for (_, n) in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
            }
            '\'' | '"' => {
                for (_, n) in chars.by_ref() {
                    if n == c {
                        break;
                    }
                }
                at_statement_start = false;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, n)) = chars.peek() {
                    if !(n.is_ascii_alphanumeric() || n == '_') {
                        break;
                    }
                    end = i + n.len_utf8();
                    chars.next();
                }
                if at_statement_start {
                    let word = &sql[start..end];
                    if let Some(keyword) = TRANSACTION_CONTROL
                        .iter()
                        .copied()
                        .find(|k| k.eq_ignore_ascii_case(word))
                    {
                        return Some(keyword);
                    }
                }
                at_statement_start = false;
            }
            _ => at_statement_start = false,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ddl_passes() {
        assert_eq!(
            transaction_control_keyword("CREATE TABLE a (id INT); INSERT INTO a VALUES (1);"),
            None
        );
    }

    #[test]
    fn test_trailing_commit_found() {
        assert_eq!(
            transaction_control_keyword("CREATE TABLE a (id INT); COMMIT;"),
            Some("COMMIT")
        );
    }

    #[test]
    fn test_leading_keywords_any_case() {
        assert_eq!(transaction_control_keyword("begin;"), Some("BEGIN"));
        assert_eq!(
            transaction_control_keyword("-- setup\nStart Transaction;"),
            Some("START")
        );
        assert_eq!(transaction_control_keyword("/* x */ rollback"), Some("ROLLBACK"));
        assert_eq!(transaction_control_keyword("SELECT 1;\nend;"), Some("END"));
        assert_eq!(transaction_control_keyword("abort"), Some("ABORT"));
    }

    #[test]
    fn test_keywords_inside_strings_and_comments_ignored() {
        let sql = "INSERT INTO t VALUES ('a; commit');\n\
                   -- ; rollback\n\
                   /* ; begin */\n\
                   SELECT \"x; end\" FROM t;";
        assert_eq!(transaction_control_keyword(sql), None);
    }

    #[test]
    fn test_keyword_mid_statement_ignored() {
        assert_eq!(
            transaction_control_keyword("SELECT CASE WHEN x THEN 1 END FROM t;"),
            None
        );
        assert_eq!(transaction_control_keyword("CREATE TABLE commits (id INT);"), None);
    }
}

//! Display titles of the form "App - Title".

/// Separator between application name and window title.
pub const SEPARATOR: &str = " - ";

/// Build the string patterns are matched against.
///
/// An empty `app` yields an empty string, an empty `title` yields `app` alone
/// (no trailing separator), otherwise `app - title`.
pub fn display_title(app: &str, title: &str) -> String {
    if app.is_empty() {
        String::new()
    } else if title.is_empty() {
        app.to_string()
    } else {
        format!("{app}{SEPARATOR}{title}")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn three_way_branch() {
        assert_eq!(display_title("", "bash"), "");
        assert_eq!(display_title("", ""), "");
        assert_eq!(display_title("Messages", ""), "Messages");
        assert_eq!(display_title("Terminal", "bash"), "Terminal - bash");
    }

    #[test]
    fn separator_inside_inputs_is_kept_verbatim() {
        assert_eq!(display_title("A - B", "C - D"), "A - B - C - D");
        assert_eq!(display_title(" - ", ""), " - ");
    }

    proptest! {
        #[test]
        fn title_composition(app in ".*", title in ".*") {
            let got = display_title(&app, &title);
            if app.is_empty() {
                prop_assert_eq!(got, "");
            } else if title.is_empty() {
                prop_assert_eq!(got, app);
            } else {
                prop_assert_eq!(got, format!("{} - {}", app, title));
            }
        }
    }
}

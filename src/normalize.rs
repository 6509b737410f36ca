//! Canonicalization of user supplied category and subcategory names.

/// Convert `raw` into the form that category and subcategory names are stored in.
///
/// Underscores are replaced with spaces so that path segments such as
/// `home_&_accessories` resolve to the same name as `Home & Accessories`.
/// The result is trimmed and title-cased: a letter is upper-cased when the
/// character before it is not a letter and lower-cased otherwise.
///
/// The same function is used when writing names and when looking them up, so
/// a name is always found under any spelling that normalizes to it.
pub fn normalize(raw: &str) -> String {
    let replaced = raw.replace('_', " ");
    let trimmed = replaced.trim();

    let mut normalized = String::with_capacity(trimmed.len());
    let mut previous_is_letter = false;

    for c in trimmed.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                normalized.extend(c.to_lowercase());
            } else {
                normalized.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            normalized.push(c);
            previous_is_letter = false;
        }
    }

    normalized
}

#[cfg(test)]
mod normalize_tests {
    use super::normalize;

    #[test]
    fn title_cases_each_word() {
        assert_eq!(normalize("home & accessories"), "Home & Accessories");
    }

    #[test]
    fn replaces_underscores_with_spaces() {
        assert_eq!(normalize("home_&_accessories"), "Home & Accessories");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize("  \tkitchen  \n"), "Kitchen");
    }

    #[test]
    fn lower_cases_the_rest_of_each_word() {
        assert_eq!(normalize("mEN'S sHOES"), "Men'S Shoes");
    }

    #[test]
    fn capitalizes_letters_after_digits_and_hyphens() {
        assert_eq!(normalize("3d printers"), "3D Printers");
        assert_eq!(normalize("e-commerce"), "E-Commerce");
    }

    #[test]
    fn empty_and_blank_input_normalize_to_empty_string() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  _ _  "), "");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "home_&_accessories",
            "  FASHION  ",
            "kids' toys",
            "3d printers",
            "électronique grand public",
            "a__b",
        ];

        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "normalize is not idempotent for {input:?}");
        }
    }
}

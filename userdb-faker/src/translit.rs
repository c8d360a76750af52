//! Ukrainian to Latin transliteration (national romanization, 2010)
//!
//! Used only for email local parts, so the output is lower-case ASCII.
//! Soft signs and apostrophes are dropped.

/// Lower-case romanization of `text`.
///
/// `Є Ї Й Ю Я` take their word-initial forms (`ye yi y yu ya`) at the
/// start of a word, and `зг` becomes `zgh`.
pub fn to_latin(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    let mut prev: Option<char> = None;

    for ch in text.chars() {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        let mapped = match lower {
            'а' => "a",
            'б' => "b",
            'в' => "v",
            'г' if prev == Some('з') => "gh",
            'г' => "h",
            'ґ' => "g",
            'д' => "d",
            'е' => "e",
            'є' if word_start => "ye",
            'є' => "ie",
            'ж' => "zh",
            'з' => "z",
            'и' => "y",
            'і' => "i",
            'ї' if word_start => "yi",
            'ї' => "i",
            'й' if word_start => "y",
            'й' => "i",
            'к' => "k",
            'л' => "l",
            'м' => "m",
            'н' => "n",
            'о' => "o",
            'п' => "p",
            'р' => "r",
            'с' => "s",
            'т' => "t",
            'у' => "u",
            'ф' => "f",
            'х' => "kh",
            'ц' => "ts",
            'ч' => "ch",
            'ш' => "sh",
            'щ' => "shch",
            'ю' if word_start => "yu",
            'ю' => "iu",
            'я' if word_start => "ya",
            'я' => "ia",
            'ь' | '\'' | '’' | 'ʼ' => "",
            c if c.is_ascii_alphanumeric() => {
                out.push(c.to_ascii_lowercase());
                word_start = false;
                prev = Some(lower);
                continue;
            }
            _ => {
                word_start = true;
                prev = None;
                continue;
            }
        };
        out.push_str(mapped);
        word_start = false;
        prev = Some(lower);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_names() {
        assert_eq!(to_latin("Олена"), "olena");
        assert_eq!(to_latin("Шевченко"), "shevchenko");
        assert_eq!(to_latin("Щербак"), "shcherbak");
        assert_eq!(to_latin("Харків"), "kharkiv");
    }

    #[test]
    fn word_initial_forms() {
        assert_eq!(to_latin("Євген"), "yevhen");
        assert_eq!(to_latin("Юрій"), "yurii");
        assert_eq!(to_latin("Яна"), "yana");
        assert_eq!(to_latin("Їжак"), "yizhak");
        assert_eq!(to_latin("Андрій"), "andrii");
        assert_eq!(to_latin("Соломія"), "solomiia");
    }

    #[test]
    fn zgh_and_apostrophes() {
        assert_eq!(to_latin("Згурський"), "zghurskyi");
        assert_eq!(to_latin("Мар'яна"), "mariana");
        assert_eq!(to_latin("Кузьменко"), "kuzmenko");
    }

    #[test]
    fn output_is_ascii() {
        let out = to_latin("Ґалаґан Їжакевич-Єрмоленко");
        assert!(out.is_ascii(), "{out}");
        assert_eq!(out, "galagan yizhakevych-yermolenko".replace([' ', '-'], ""));
    }
}

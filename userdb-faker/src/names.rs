//! Built-in name tables (Ukrainian)

pub const MALE_FIRST_NAMES: &[&str] = &[
    "Андрій", "Богдан", "Василь", "Віктор", "Володимир", "Дмитро", "Євген", "Іван",
    "Ігор", "Микола", "Михайло", "Олег", "Олександр", "Олексій", "Остап", "Павло",
    "Петро", "Роман", "Сергій", "Степан", "Тарас", "Юрій", "Ярослав", "Максим",
    "Назар", "Денис", "Артем", "Григорій", "Захар", "Федір",
];

pub const FEMALE_FIRST_NAMES: &[&str] = &[
    "Анастасія", "Ганна", "Дарина", "Євгенія", "Зоряна", "Ірина", "Катерина", "Лариса",
    "Леся", "Марія", "Мар'яна", "Наталія", "Оксана", "Олена", "Ольга", "Світлана",
    "Соломія", "Тетяна", "Уляна", "Христина", "Юлія", "Яна", "Вікторія", "Людмила",
    "Надія", "Любов", "Галина", "Софія", "Ярина", "Богдана",
];

/// Surnames that do not change with gender
pub const SURNAMES: &[&str] = &[
    "Шевченко", "Бойко", "Коваленко", "Бондаренко", "Ткаченко", "Кравченко", "Олійник",
    "Шевчук", "Поліщук", "Бондар", "Ткачук", "Мельник", "Марченко", "Лисенко", "Руденко",
    "Савченко", "Петренко", "Клименко", "Павленко", "Кравчук", "Кузьменко", "Іваненко",
    "Гнатюк", "Мороз", "Коваль", "Зінченко", "Гончаренко", "Левченко", "Ющенко",
    "Остапчук", "Данилюк", "Собко", "Зозуля", "Гуменюк", "Юрченко",
];

/// Adjectival surnames in the masculine form; the feminine form swaps
/// the `ий` ending for `а`
pub const GENDERED_SURNAMES: &[&str] = &[
    "Ковальський", "Вишневський", "Шептицький", "Заболотний", "Грушевський", "Франківський",
    "Кобилянський", "Довгий", "Чорний", "Білий",
];

/// Feminine form of a surname from either table.
pub fn feminine(surname: &str) -> String {
    match surname.strip_suffix("ий") {
        Some(stem) => format!("{stem}а"),
        None => surname.to_string(),
    }
}

pub const EMAIL_DOMAINS: &[&str] = &["ukr.net", "i.ua", "meta.ua", "gmail.com", "e-mail.ua"];

pub const EMAIL_SEPARATORS: &[&str] = &[".", "_", ""];

#[cfg(test)]
mod tests {
    use super::*;
    use userdb_store::MAX_NAME_LEN;

    #[test]
    fn feminine_forms() {
        assert_eq!(feminine("Ковальський"), "Ковальська");
        assert_eq!(feminine("Чорний"), "Чорна");
        assert_eq!(feminine("Шевченко"), "Шевченко");
        assert_eq!(feminine("Стельмах"), "Стельмах");
    }

    #[test]
    fn tables_fit_columns() {
        let all = MALE_FIRST_NAMES
            .iter()
            .chain(FEMALE_FIRST_NAMES)
            .chain(SURNAMES)
            .chain(GENDERED_SURNAMES);
        for name in all {
            assert!(!name.is_empty());
            assert!(name.chars().count() <= MAX_NAME_LEN, "{name}");
        }
    }
}

//! User-facing texts.
//!
//! Templates use `{name}` placeholders. Defaults are Russian; the web shell
//! can override any of them from its configuration file.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub loading: String,
    pub search_failed: String,
    pub nothing_found: String,
    pub previews_unavailable: String,
    /// `{count}`
    pub teaser_found: String,
    pub teaser_hint: String,
    pub subscribe: String,
    /// `{count}`
    pub requests_left: String,
    pub previous_page: String,
    pub next_page: String,
    /// `{title}`
    pub title_heading: String,
    /// `{min}`, `{max}`
    pub price_heading: String,
    /// `{seller}`
    pub seller_heading: String,
    /// `{id}`
    pub category_heading: String,
    pub invalid_link: String,
    pub exact_phrase: String,
    pub search_button: String,
    pub title_label: String,
    pub min_price_label: String,
    pub max_price_label: String,
    pub seller_label: String,
    pub categories_title: String,
    pub categories_failed: String,
    /// `{count}`
    pub category_books: String,
    pub book_failed: String,
    pub back_to_results: String,
    pub login_title: String,
    pub email_label: String,
    pub password_label: String,
    pub login_button: String,
    pub logout: String,
    pub invalid_credentials: String,
    pub login_failed: String,
    pub subscribe_title: String,
    pub subscribe_text: String,
    pub not_found: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            loading: "Загрузка…".into(),
            search_failed: "Не удалось выполнить поиск. Попробуйте позже.".into(),
            nothing_found: "По вашему запросу ничего не найдено".into(),
            previews_unavailable: "Некоторые изображения недоступны".into(),
            teaser_found: "Найдено книг: {count}".into(),
            teaser_hint: "Полный список доступен по подписке".into(),
            subscribe: "Оформить подписку".into(),
            requests_left: "Осталось запросов: {count}".into(),
            previous_page: "Назад".into(),
            next_page: "Вперёд".into(),
            title_heading: "Поиск по названию: «{title}»".into(),
            price_heading: "Книги от {min} до {max} ₽".into(),
            seller_heading: "Книги продавца {seller}".into(),
            category_heading: "Категория №{id}".into(),
            invalid_link: "Некорректная ссылка поиска".into(),
            exact_phrase: "Точная фраза".into(),
            search_button: "Найти".into(),
            title_label: "Название".into(),
            min_price_label: "Цена от".into(),
            max_price_label: "до".into(),
            seller_label: "Продавец".into(),
            categories_title: "Категории".into(),
            categories_failed: "Не удалось загрузить категории. Попробуйте позже.".into(),
            category_books: "Книг: {count}".into(),
            book_failed: "Не удалось загрузить книгу. Попробуйте позже.".into(),
            back_to_results: "← Назад".into(),
            login_title: "Вход".into(),
            email_label: "Email".into(),
            password_label: "Пароль".into(),
            login_button: "Войти".into(),
            logout: "Выйти".into(),
            invalid_credentials: "Неверный email или пароль".into(),
            login_failed: "Не удалось войти. Попробуйте позже.".into(),
            subscribe_title: "Подписка".into(),
            subscribe_text: "Подписка открывает полные результаты поиска по цене без ограничений."
                .into(),
            not_found: "Страница не найдена".into(),
        }
    }
}

/// Substitute `{name}` placeholders.
pub fn fill(template: &str, values: &[(&str, &dyn std::fmt::Display)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), &value.to_string())
        })
}

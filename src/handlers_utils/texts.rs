use telers::utils::text::html_quote;

use crate::utils::format_optional_file_size;

pub const START: &str = "👋 <b>Привет! Я бот для скачивания медиа из Telegram.</b>\n\n\
    📥 Отправь мне ссылку на пост из канала, и я пришлю тебе файл.\n\
    ⚡ Файлы, которые уже скачивали, я отдаю мгновенно из кэша.\n\n\
    Например: <code>https://t.me/channel/123</code>\n\n\
    /help - как пользоваться\n\
    /stats - твоя статистика";

pub const HELP: &str = "📖 <b>Как пользоваться ботом</b>\n\n\
    1. Открой пост в Telegram-канале\n\
    2. Скопируй ссылку на пост\n\
    3. Отправь ссылку мне\n\n\
    Поддерживаются ссылки вида:\n\
    • <code>https://t.me/channel/123</code>\n\
    • <code>https://t.me/c/1234567890/123</code>\n\
    • <code>tg://resolve?domain=channel&amp;post=123</code>\n\n\
    💡 Для закрытых каналов добавь бота в канал как администратора.";

pub const HINT: &str = "🤔 Отправь мне ссылку на пост из Telegram-канала.\n\n\
    Команды:\n\
    /start - начать\n\
    /help - помощь\n\
    /stats - статистика";

pub const UNKNOWN_COMMAND: &str = "❌ Неизвестная команда. Используй /help для справки";

pub const FETCHING: &str = "⏳ Получаю файл из Telegram...";

pub const FETCH_FAILED: &str = "❌ <b>Ошибка загрузки</b>\n\n\
    Не удалось получить файл. Возможные причины:\n\
    • Неверная ссылка\n\
    • Канал недоступен\n\
    • Бот не добавлен в канал\n\
    • Файл удалён\n\n\
    💡 Добавь бота в канал как администратора для доступа к файлам!";

pub const INVALID_LINK: &str = "❌ Не удалось разобрать ссылку. Нужна ссылка на конкретный пост, например <code>https://t.me/channel/123</code>";

pub const INTERNAL_ERROR: &str = "❌ Произошла внутренняя ошибка. Попробуй позже";

pub fn stats(user_downloads: i64, cached_files: i64, total_downloads: i64) -> String {
    format!(
        "📊 <b>Твоя статистика</b>\n\n\
        📥 Твоих загрузок: {user_downloads}\n\
        ⚡ В кэше: {cached_files} файлов\n\
        🌐 Всего загрузок: {total_downloads}"
    )
}

pub fn media_caption(title: &str, file_size: Option<i64>, cached: bool) -> String {
    format!(
        "{status}\n\n📄 {title}\n💾 Размер: {size}",
        status = if cached { "⚡ <b>Из кэша!</b>" } else { "✅ <b>Готово!</b>" },
        title = html_quote(title),
        size = format_optional_file_size(file_size),
    )
}

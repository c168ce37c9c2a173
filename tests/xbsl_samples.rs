//! Integration tests: whole XBSL modules through the public API

use pretty_assertions::assert_eq;
use xbsl_lexer::{lex, Lexer, LexerConfig, RuleDef, StateDef, TokenKind, ROOT, XBSL};

const MODULE: &str = r#"импорт Система.Коллекции

@ОбработчикСобытия
структура Заказ
    пер Номер: Число = 0
    знч Создан = ДатаВремя{2024-03-01T12:00:00}
    Ключ: Ууид? = Ууид{5f1c8a2e-0000-4000-8000-000000000000}

метод Найти(Клиент: Строка): Массив<Заказ>
    // Заказы клиента
    возврат Запрос{
        ВЫБРАТЬ * ИЗ Заказы ГДЕ Клиент = %Клиент
    }.Выполнить()

метод Описание(): Строка
    попытка
        возврат "Заказ №%Номер от ${Создан.Дата}\n"
    поймать Ошибка: Исключение
        /* не удалось
           сформировать */
        возврат "?"
    ;
"#;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn has(tokens: &[(TokenKind, &str)], kind: TokenKind, text: &str) -> bool {
    tokens.iter().any(|&(k, t)| k == kind && t == text)
}

#[test]
fn test_module_round_trips() {
    init();
    let rebuilt: String = lex(MODULE).map(|t| t.text).collect();
    assert_eq!(rebuilt, MODULE);
}

#[test]
fn test_module_highlights() {
    init();
    let tokens: Vec<(TokenKind, &str)> = lex(MODULE).map(|t| (t.kind, t.text)).collect();

    assert!(has(&tokens, TokenKind::KeywordNamespace, "импорт"));
    assert!(has(&tokens, TokenKind::NameNamespace, "Система.Коллекции"));
    assert!(has(&tokens, TokenKind::NameTag, "@ОбработчикСобытия"));
    assert!(has(&tokens, TokenKind::NameEntity, "Заказ"));
    assert!(has(&tokens, TokenKind::NameVariable, "Номер"));
    assert!(has(&tokens, TokenKind::NameConstant, "Создан"));
    assert!(has(&tokens, TokenKind::LiteralDate, "2024-03-01T12:00:00"));
    assert!(has(&tokens, TokenKind::LiteralNumberBin, "5f1c8a2e-0000-4000-8000-000000000000"));
    assert!(has(&tokens, TokenKind::NameFunction, "Найти"));
    assert!(has(&tokens, TokenKind::CommentSingle, "// Заказы клиента"));
    assert!(has(&tokens, TokenKind::KeywordType, "Запрос"));
    assert!(has(&tokens, TokenKind::LiteralStringInterpol, "%Клиент"));
    assert!(has(&tokens, TokenKind::LiteralStringInterpol, "${Создан.Дата}"));
    assert!(has(&tokens, TokenKind::LiteralStringEscape, "\\n"));
    assert!(has(&tokens, TokenKind::NameException, "попытка\n"));
    assert!(has(&tokens, TokenKind::CommentMultiline, "/* не удалось\n           сформировать */"));
    assert!(tokens.iter().all(|&(k, _)| k != TokenKind::Error), "{tokens:#?}");
}

#[test]
fn test_module_ends_in_root() {
    let mut tokens = lex(MODULE);
    tokens.by_ref().for_each(drop);
    assert_eq!(tokens.stack(), vec![ROOT]);
}

#[test]
fn test_json_dump() {
    let tokens: Vec<_> = lex("Дата{2024-01-01}").collect();
    let json = serde_json::to_value(&tokens).unwrap();

    assert_eq!(json[0]["kind"], "Name.Class");
    assert_eq!(json[2]["kind"], "Literal.Date");
    assert_eq!(json[2]["text"], "2024-01-01");
    assert_eq!(json[3]["span"]["end"], 20);
}

#[test]
fn test_concurrent_runs_share_the_grammar() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("{}\"незакрытая строка {i}", MODULE);
                let mut tokens = XBSL.tokenize(&source);
                let count = tokens.by_ref().count();
                (count, tokens.depth())
            })
        })
        .collect();

    for handle in handles {
        let (count, depth) = handle.join().unwrap();
        assert!(count > 0);
        assert_eq!(depth, 2);
    }
}

#[test]
fn test_custom_grammar_with_text_fallback() {
    init();
    let lexer = Lexer::new(vec![StateDef::new(
        ROOT,
        vec![RuleDef::token(r"\d+", TokenKind::LiteralNumber)],
    )])
    .unwrap()
    .with_config(LexerConfig::from_json(r#"{ "fallback": "Text" }"#).unwrap());

    let tokens: Vec<_> = lexer.tokenize("1a2").map(|t| (t.kind, t.text)).collect();
    assert_eq!(
        tokens,
        vec![
            (TokenKind::LiteralNumber, "1"),
            (TokenKind::Text, "a"),
            (TokenKind::LiteralNumber, "2"),
        ]
    );
}

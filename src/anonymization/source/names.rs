//! Gendered first-name pools per locale

use super::Sex;
use crate::anonymization::locale::Locale;

const EN_MALE: &[&str] = &[
    "James", "Oliver", "Harry", "George", "Thomas", "William", "Jack", "Henry", "Charlie",
    "Edward", "Samuel", "Daniel", "Joseph", "Arthur", "Leo", "Noah",
];
const EN_FEMALE: &[&str] = &[
    "Olivia", "Amelia", "Isla", "Emily", "Ava", "Sophie", "Grace", "Lily", "Jessica", "Hannah",
    "Ella", "Charlotte", "Alice", "Freya", "Ruby", "Evie",
];

const FR_MALE: &[&str] = &[
    "Louis", "Gabriel", "Jules", "Hugo", "Arthur", "Lucas", "Nathan", "Paul", "Antoine",
    "Mathieu",
];
const FR_FEMALE: &[&str] = &[
    "Jade", "Louise", "Emma", "Chloé", "Inès", "Léa", "Manon", "Camille", "Juliette", "Zoé",
];

const PT_MALE: &[&str] = &[
    "João", "Pedro", "Lucas", "Gabriel", "Matheus", "Rafael", "Gustavo", "Felipe", "Bruno",
    "Thiago",
];
const PT_FEMALE: &[&str] = &[
    "Maria", "Ana", "Júlia", "Beatriz", "Mariana", "Larissa", "Camila", "Fernanda", "Letícia",
    "Gabriela",
];

const JA_MALE: &[&str] = &["翔太", "大輔", "健太", "拓也", "直樹", "浩二", "誠", "蓮"];
const JA_FEMALE: &[&str] = &["陽子", "美咲", "花子", "由美", "真由美", "恵子", "さくら", "葵"];

const ZH_CN_MALE: &[&str] = &["伟", "强", "磊", "军", "勇", "杰", "涛", "明"];
const ZH_CN_FEMALE: &[&str] = &["芳", "娜", "敏", "静", "丽", "艳", "娟", "霞"];

const ZH_TW_MALE: &[&str] = &["家豪", "志明", "俊傑", "建宏", "冠宇", "承翰", "宗翰", "柏翰"];
const ZH_TW_FEMALE: &[&str] = &["淑芬", "美玲", "雅婷", "怡君", "佳穎", "欣怡", "詩涵", "宜蓁"];

/// First names for the given locale and sex. Never empty.
pub(super) fn first_names(locale: Locale, sex: Sex) -> &'static [&'static str] {
    match (locale, sex) {
        (Locale::En, Sex::Male) => EN_MALE,
        (Locale::En, Sex::Female) => EN_FEMALE,
        (Locale::FrFr, Sex::Male) => FR_MALE,
        (Locale::FrFr, Sex::Female) => FR_FEMALE,
        (Locale::PtBr, Sex::Male) => PT_MALE,
        (Locale::PtBr, Sex::Female) => PT_FEMALE,
        (Locale::JaJp, Sex::Male) => JA_MALE,
        (Locale::JaJp, Sex::Female) => JA_FEMALE,
        (Locale::ZhCn, Sex::Male) => ZH_CN_MALE,
        (Locale::ZhCn, Sex::Female) => ZH_CN_FEMALE,
        (Locale::ZhTw, Sex::Male) => ZH_TW_MALE,
        (Locale::ZhTw, Sex::Female) => ZH_TW_FEMALE,
    }
}

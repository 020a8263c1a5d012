/*!
 * Tests for ISO language code utilities
 */

use mdtranslate::language_utils::{
    get_language_name, language_codes_match, normalize_to_part1_or_part2t, normalize_to_part2t,
    validate_language_code, LanguageCodeType,
};

#[test]
fn test_validateLanguageCode_shouldDetectCodeType() {
    assert!(matches!(validate_language_code("es").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("spa").unwrap(), LanguageCodeType::Part2T));
    assert!(matches!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B));
    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("english").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_normalizeToPart2t_shouldAcceptAllSpellings() {
    assert_eq!(normalize_to_part2t("de").unwrap(), "deu");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");
    assert_eq!(normalize_to_part2t("DEU").unwrap(), "deu");
    assert_eq!(normalize_to_part2t(" fr ").unwrap(), "fra");
}

#[test]
fn test_normalizeToPart1OrPart2t_shouldPreferTwoLetters() {
    assert_eq!(normalize_to_part1_or_part2t("spa").unwrap(), "es");
    assert_eq!(normalize_to_part1_or_part2t("fre").unwrap(), "fr");
    assert_eq!(normalize_to_part1_or_part2t("en").unwrap(), "en");
    // No two-letter code for Asturian
    assert_eq!(normalize_to_part1_or_part2t("ast").unwrap(), "ast");
}

#[test]
fn test_languageCodesMatch_acrossFormats() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("chi", "zh"));
    assert!(!language_codes_match("en", "es"));
    assert!(!language_codes_match("xx", "xx"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("deu").unwrap(), "German");
    assert!(get_language_name("qq").is_err());
}

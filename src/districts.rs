// Heuristic district extraction for Hong Kong delivery addresses.
//
// Classification is a substring scan over an ordered gazetteer of
// district and area names. The order is load-bearing: earlier tokens
// win, which is how overlapping names and duplicate spellings are
// resolved (佐敦 is listed before 佐敦谷, so the broader name takes
// those addresses). Keep this a slice, not a set.

/// Group label used when no district can be determined. Always has an
/// entry in the coordinate table, so lookups on it never fail.
pub const UNKNOWN_DISTRICT: &str = "其他/未知";

/// `(token, canonical name)` pairs, checked in order, first match wins.
///
/// Includes common typo/variant spellings mapped to their canonical
/// form (e.g. 元郎 → 元朗, 深水步 → 深水埗) and specific estates/areas
/// that appear in delivery addresses.
static GAZETTEER: &[(&str, &str)] = &[
    // New Territories West
    ("屯門", "屯門"),
    ("元朗", "元朗"),
    ("元郎", "元朗"),
    ("天水圍", "天水圍"),
    ("荃灣", "荃灣"),
    ("葵涌", "葵涌"),
    ("青衣", "青衣"),
    ("深井", "深井"),
    ("洪水橋", "洪水橋"),
    ("流浮山", "流浮山"),
    ("大窩口", "大窩口"),
    ("葵興", "葵興"),
    ("葵芳", "葵芳"),
    ("荔景", "荔景"),
    ("青龍頭", "青龍頭"),
    ("小欖", "小欖"),
    ("掃管笏", "掃管笏"),
    ("錦田", "錦田"),
    ("八鄉", "八鄉"),
    // New Territories East
    ("沙田", "沙田"),
    ("大圍", "大圍"),
    ("火炭", "火炭"),
    ("馬鞍山", "馬鞍山"),
    ("大埔", "大埔"),
    ("粉嶺", "粉嶺"),
    ("上水", "上水"),
    ("石門", "石門"),
    ("九肚山", "九肚山"),
    ("科學園", "科學園"),
    ("太和", "太和"),
    ("馬料水", "馬料水"),
    // Sai Kung / Tseung Kwan O
    ("西貢", "西貢"),
    ("將軍澳", "將軍澳"),
    ("康城", "康城"),
    ("清水灣", "清水灣"),
    ("坑口", "坑口"),
    ("寶琳", "寶琳"),
    ("寶林", "寶琳"),
    ("調景嶺", "調景嶺"),
    // Kowloon West
    ("尖沙咀", "尖沙咀"),
    ("油麻地", "油麻地"),
    ("佐敦", "佐敦"),
    ("旺角", "旺角"),
    ("太子", "太子"),
    ("大角咀", "大角咀"),
    ("深水埗", "深水埗"),
    ("深水步", "深水埗"),
    ("長沙灣", "長沙灣"),
    ("荔枝角", "荔枝角"),
    ("美孚", "美孚"),
    ("石硤尾", "石硤尾"),
    ("南昌", "南昌"),
    ("奧運", "奧運"),
    ("九龍塘", "九龍塘"),
    ("何文田", "何文田"),
    ("蘇屋", "蘇屋"),
    ("白田", "白田"),
    // Kowloon East
    ("紅磡", "紅磡"),
    ("土瓜灣", "土瓜灣"),
    ("馬頭圍", "馬頭圍"),
    ("九龍城", "九龍城"),
    ("黃大仙", "黃大仙"),
    ("慈雲山", "慈雲山"),
    ("鑽石山", "鑽石山"),
    ("新蒲崗", "新蒲崗"),
    ("彩虹", "彩虹"),
    ("牛頭角", "牛頭角"),
    ("九龍灣", "九龍灣"),
    ("觀塘", "觀塘"),
    ("藍田", "藍田"),
    ("油塘", "油塘"),
    ("樂富", "樂富"),
    ("彩雲", "彩雲"),
    ("坪石", "坪石"),
    ("秀茂坪", "秀茂坪"),
    ("鯉魚門", "鯉魚門"),
    ("啟德", "啟德"),
    ("牛池灣", "牛池灣"),
    ("佐敦谷", "佐敦谷"),
    // Hong Kong Island West / Central
    ("中環", "中環"),
    ("上環", "上環"),
    ("西環", "西環"),
    ("堅尼地城", "堅尼地城"),
    ("石塘咀", "石塘咀"),
    ("西營盤", "西營盤"),
    ("薄扶林", "薄扶林"),
    ("山頂", "山頂"),
    ("半山", "半山"),
    // Hong Kong Island East / Wan Chai
    ("灣仔", "灣仔"),
    ("銅鑼灣", "銅鑼灣"),
    ("跑馬地", "跑馬地"),
    ("大坑", "大坑"),
    ("北角", "北角"),
    ("鰂魚涌", "鰂魚涌"),
    ("魚則魚涌", "鰂魚涌"),
    ("太古", "太古"),
    ("西灣河", "西灣河"),
    ("筲箕灣", "筲箕灣"),
    ("柴灣", "柴灣"),
    ("小西灣", "小西灣"),
    ("炮台山", "炮台山"),
    ("天后", "天后"),
    // Hong Kong Island South
    ("香港仔", "香港仔"),
    ("鴨脷洲", "鴨脷洲"),
    ("鴨利洲", "鴨脷洲"),
    ("黃竹坑", "黃竹坑"),
    ("淺水灣", "淺水灣"),
    ("赤柱", "赤柱"),
    ("石澳", "石澳"),
    ("數碼港", "數碼港"),
    ("深水灣", "深水灣"),
    // Outlying islands
    ("東涌", "東涌"),
    ("愉景灣", "愉景灣"),
    ("馬灣", "馬灣"),
    ("珀麗灣", "珀麗灣"),
    ("長洲", "長洲"),
    ("坪洲", "坪洲"),
    ("南丫島", "南丫島"),
    ("大嶼山", "大嶼山"),
];

/// Extract a canonical district name from a free-text address.
///
/// Whitespace is stripped before matching so broken copy/paste
/// addresses still hit. Returns [`UNKNOWN_DISTRICT`] when nothing in
/// the gazetteer matches. Pure: the same address always classifies
/// the same way.
pub fn classify(address: &str) -> &'static str {
    let normalized: String = address.chars().filter(|c| !c.is_whitespace()).collect();
    if normalized.is_empty() {
        return UNKNOWN_DISTRICT;
    }
    for (token, canonical) in GAZETTEER {
        if normalized.contains(token) {
            return canonical;
        }
    }
    UNKNOWN_DISTRICT
}

/// All canonical names the classifier can emit, in gazetteer order,
/// without duplicates. Used to sanity-check the coordinate table.
#[cfg(test)]
pub fn canonical_names() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for (_, canonical) in GAZETTEER {
        if !seen.contains(canonical) {
            seen.push(canonical);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::{classify, UNKNOWN_DISTRICT};

    #[test]
    fn extracts_district_from_estate_address() {
        assert_eq!(classify("紅磡海逸豪園16座8樓B室"), "紅磡");
    }

    #[test]
    fn is_pure_for_a_fixed_input() {
        let addr = "紅磡海逸豪園16座8樓B室";
        assert_eq!(classify(addr), classify(addr));
    }

    #[test]
    fn collapses_variant_spellings() {
        assert_eq!(classify("元郎形點商場一期"), "元朗");
        assert_eq!(classify("深水步福榮街100號"), "深水埗");
        assert_eq!(classify("鴨利洲海怡半島"), "鴨脷洲");
        assert_eq!(classify("寶林新都城中心"), "寶琳");
    }

    #[test]
    fn ignores_whitespace_inside_the_address() {
        assert_eq!(classify("將軍澳 唐德街 9號"), "將軍澳");
        assert_eq!(classify("天 水 圍 天恩邨"), "天水圍");
    }

    #[test]
    fn unmatched_address_is_unknown() {
        assert_eq!(classify("Flat B, 8/F, Some Tower"), UNKNOWN_DISTRICT);
        assert_eq!(classify(""), UNKNOWN_DISTRICT);
    }

    #[test]
    fn earlier_token_wins_on_overlap() {
        // 佐敦 is listed before 佐敦谷, so the broader name wins.
        assert_eq!(classify("佐敦谷彩霞道"), "佐敦");
    }
}

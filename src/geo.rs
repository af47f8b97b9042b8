// District-center coordinate estimation.
//
// There is no real geocoding here. Each canonical district name maps
// to an approximate center point, and every estimate gets a small
// random offset so multiple customers in the same district don't stack
// on one map pixel. The random source is passed in by the caller so
// tests can seed it.

use once_cell::sync::Lazy;
use rand::Rng;
use std::collections::HashMap;

use crate::districts::{classify, UNKNOWN_DISTRICT};

/// Total jitter span per axis in degrees; the offset is uniform in
/// ±0.002°, roughly ±200m. No clamping is applied afterwards.
const JITTER_SPAN: f64 = 0.004;

/// Fallback center for the unknown sentinel (harbour mid-point).
const UNKNOWN_CENTER: (f64, f64) = (22.3193, 114.1694);

/// Approximate `(name, lat, lng)` centers for every canonical
/// gazetteer name plus the unknown sentinel.
static DISTRICT_CENTERS: &[(&str, f64, f64)] = &[
    // New Territories West
    ("屯門", 22.3911, 113.9770),
    ("元朗", 22.4445, 114.0222),
    ("天水圍", 22.4583, 114.0014),
    ("荃灣", 22.3705, 114.1140),
    ("葵涌", 22.3570, 114.1261),
    ("青衣", 22.3540, 114.1070),
    ("深井", 22.3740, 114.0580),
    ("洪水橋", 22.4330, 113.9940),
    ("流浮山", 22.4690, 113.9830),
    ("大窩口", 22.3710, 114.1160),
    ("葵興", 22.3630, 114.1310),
    ("葵芳", 22.3570, 114.1270),
    ("荔景", 22.3510, 114.1270),
    ("青龍頭", 22.3620, 114.0550),
    ("小欖", 22.3720, 113.9940),
    ("掃管笏", 22.3780, 113.9950),
    ("錦田", 22.4350, 114.0630),
    ("八鄉", 22.4330, 114.0750),
    // New Territories East
    ("沙田", 22.3820, 114.1880),
    ("大圍", 22.3730, 114.1780),
    ("火炭", 22.3950, 114.1980),
    ("馬鞍山", 22.4250, 114.2320),
    ("大埔", 22.4510, 114.1680),
    ("粉嶺", 22.4920, 114.1390),
    ("上水", 22.5010, 114.1280),
    ("石門", 22.3880, 114.2080),
    ("九肚山", 22.4020, 114.1930),
    ("科學園", 22.4260, 114.2100),
    ("太和", 22.4510, 114.1610),
    ("馬料水", 22.4210, 114.2080),
    // Sai Kung / Tseung Kwan O
    ("西貢", 22.3830, 114.2710),
    ("將軍澳", 22.3070, 114.2600),
    ("康城", 22.2960, 114.2700),
    ("清水灣", 22.2830, 114.2890),
    ("坑口", 22.3160, 114.2640),
    ("寶琳", 22.3220, 114.2580),
    ("調景嶺", 22.3040, 114.2520),
    // Kowloon West
    ("尖沙咀", 22.2980, 114.1720),
    ("油麻地", 22.3130, 114.1700),
    ("佐敦", 22.3050, 114.1710),
    ("旺角", 22.3190, 114.1690),
    ("太子", 22.3250, 114.1680),
    ("大角咀", 22.3180, 114.1610),
    ("深水埗", 22.3300, 114.1620),
    ("長沙灣", 22.3370, 114.1560),
    ("荔枝角", 22.3370, 114.1480),
    ("美孚", 22.3380, 114.1380),
    ("石硤尾", 22.3320, 114.1680),
    ("南昌", 22.3260, 114.1540),
    ("奧運", 22.3180, 114.1600),
    ("九龍塘", 22.3370, 114.1760),
    ("何文田", 22.3090, 114.1830),
    ("蘇屋", 22.3380, 114.1570),
    ("白田", 22.3370, 114.1660),
    // Kowloon East
    ("紅磡", 22.3060, 114.1880),
    ("土瓜灣", 22.3170, 114.1880),
    ("馬頭圍", 22.3220, 114.1880),
    ("九龍城", 22.3280, 114.1910),
    ("黃大仙", 22.3420, 114.1930),
    ("慈雲山", 22.3500, 114.1990),
    ("鑽石山", 22.3400, 114.2020),
    ("新蒲崗", 22.3360, 114.1980),
    ("彩虹", 22.3350, 114.2080),
    ("牛頭角", 22.3150, 114.2190),
    ("九龍灣", 22.3230, 114.2140),
    ("觀塘", 22.3120, 114.2260),
    ("藍田", 22.3070, 114.2330),
    ("油塘", 22.2970, 114.2370),
    ("樂富", 22.3380, 114.1870),
    ("彩雲", 22.3340, 114.2110),
    ("坪石", 22.3330, 114.2060),
    ("秀茂坪", 22.3190, 114.2310),
    ("鯉魚門", 22.2890, 114.2370),
    ("啟德", 22.3230, 114.1990),
    ("牛池灣", 22.3350, 114.2100),
    ("佐敦谷", 22.3260, 114.2160),
    // Hong Kong Island West / Central
    ("中環", 22.2810, 114.1580),
    ("上環", 22.2860, 114.1500),
    ("西環", 22.2850, 114.1350),
    ("堅尼地城", 22.2810, 114.1280),
    ("石塘咀", 22.2860, 114.1340),
    ("西營盤", 22.2860, 114.1420),
    ("薄扶林", 22.2610, 114.1300),
    ("山頂", 22.2710, 114.1500),
    ("半山", 22.2770, 114.1520),
    // Hong Kong Island East / Wan Chai
    ("灣仔", 22.2770, 114.1720),
    ("銅鑼灣", 22.2800, 114.1860),
    ("跑馬地", 22.2700, 114.1840),
    ("大坑", 22.2760, 114.1920),
    ("北角", 22.2910, 114.2000),
    ("鰂魚涌", 22.2880, 114.2090),
    ("太古", 22.2860, 114.2170),
    ("西灣河", 22.2820, 114.2220),
    ("筲箕灣", 22.2790, 114.2290),
    ("柴灣", 22.2660, 114.2370),
    ("小西灣", 22.2630, 114.2500),
    ("炮台山", 22.2880, 114.1930),
    ("天后", 22.2820, 114.1920),
    // Hong Kong Island South
    ("香港仔", 22.2480, 114.1550),
    ("鴨脷洲", 22.2420, 114.1550),
    ("黃竹坑", 22.2480, 114.1680),
    ("淺水灣", 22.2360, 114.1970),
    ("赤柱", 22.2180, 114.2120),
    ("石澳", 22.2310, 114.2480),
    ("數碼港", 22.2610, 114.1290),
    ("深水灣", 22.2430, 114.1800),
    // Outlying islands
    ("東涌", 22.2890, 113.9410),
    ("愉景灣", 22.2950, 114.0140),
    ("馬灣", 22.3520, 114.0590),
    ("珀麗灣", 22.3490, 114.0590),
    ("長洲", 22.2100, 114.0290),
    ("坪洲", 22.2860, 114.0430),
    ("南丫島", 22.2100, 114.1300),
    ("大嶼山", 22.2660, 113.9400),
    // Universal fallback; must stay in the table
    (UNKNOWN_DISTRICT, UNKNOWN_CENTER.0, UNKNOWN_CENTER.1),
];

static CENTER_INDEX: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    DISTRICT_CENTERS
        .iter()
        .map(|&(name, lat, lng)| (name, (lat, lng)))
        .collect()
});

/// Exact center-table lookup. `None` means the name has no direct
/// entry; callers decide which fallback to take.
pub fn district_center(name: &str) -> Option<(f64, f64)> {
    CENTER_INDEX.get(name).copied()
}

/// Estimate a coordinate for a district/subdistrict name.
///
/// Lookup order: exact table entry, then the classifier's canonical
/// reading of the name, then the unknown sentinel's center. Never
/// fails. Each call applies independent uniform jitter on both axes.
pub fn estimate(name: &str, rng: &mut impl Rng) -> (f64, f64) {
    let (lat, lng) = district_center(name)
        .or_else(|| district_center(classify(name)))
        .unwrap_or(UNKNOWN_CENTER);

    let jitter_lat = (rng.gen::<f64>() - 0.5) * JITTER_SPAN;
    let jitter_lng = (rng.gen::<f64>() - 0.5) * JITTER_SPAN;
    (lat + jitter_lat, lng + jitter_lng)
}

#[cfg(test)]
mod tests {
    use super::{district_center, estimate, UNKNOWN_CENTER};
    use crate::districts::{canonical_names, UNKNOWN_DISTRICT};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_canonical_district_has_a_center() {
        for name in canonical_names() {
            assert!(district_center(name).is_some(), "missing center for {}", name);
        }
        assert!(district_center(UNKNOWN_DISTRICT).is_some());
    }

    #[test]
    fn estimate_stays_within_jitter_range_of_the_center() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = district_center("屯門").unwrap();
        for _ in 0..50 {
            let (lat, lng) = estimate("屯門", &mut rng);
            assert!((lat - center.0).abs() <= 0.002);
            assert!((lng - center.1).abs() <= 0.002);
        }
    }

    #[test]
    fn unlisted_name_falls_back_through_the_classifier() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = district_center("元朗").unwrap();
        // Variant spelling has no direct entry but classifies to 元朗.
        let (lat, lng) = estimate("元郎", &mut rng);
        assert!((lat - center.0).abs() <= 0.002);
        assert!((lng - center.1).abs() <= 0.002);
    }

    #[test]
    fn unresolvable_name_uses_the_unknown_center() {
        let mut rng = StdRng::seed_from_u64(7);
        let (lat, lng) = estimate("nowhere in particular", &mut rng);
        assert!((lat - UNKNOWN_CENTER.0).abs() <= 0.002);
        assert!((lng - UNKNOWN_CENTER.1).abs() <= 0.002);
    }

    #[test]
    fn seeded_rng_makes_estimates_reproducible() {
        let a = estimate("沙田", &mut StdRng::seed_from_u64(42));
        let b = estimate("沙田", &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}

use std::collections::HashMap;

use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const AIRPORTS: &[Airport] = &[
    airport("HND", "羽田", 35.6762, 139.6503),
    airport("NRT", "成田", 35.6762, 140.3863),
    airport("KIX", "関西", 34.4273, 135.2441),
    airport("NGO", "中部", 34.8584, 136.8054),
    airport("FUK", "福岡", 33.5902, 130.4017),
    airport("OKA", "那覇", 26.2124, 127.6809),
    airport("CTS", "新千歳", 42.7752, 141.6928),
    airport("ICN", "仁川", 37.4602, 126.4407),
    airport("CJU", "済州", 33.5112, 126.4930),
    airport("PKX", "北京大興", 39.5098, 116.4105),
    airport("PEK", "首都", 39.9088, 116.3975),
    airport("PVG", "浦東", 31.1443, 121.8083),
    airport("CAN", "白雲", 23.3924, 113.2988),
    airport("TPE", "桃園", 25.0800, 121.2320),
    airport("HKG", "赤鱲角", 22.3080, 113.9185),
    airport("MFM", "マカオ", 22.1566, 113.5589),
    airport("BKK", "スワンナプーム", 13.6900, 100.7501),
    airport("DMK", "ドンムアン", 13.9126, 100.6068),
    airport("SIN", "チャンギ", 1.3644, 103.9915),
    airport("KUL", "クアラルンプール", 2.7456, 101.7072),
    airport("HAN", "ノイバイ", 21.2214, 105.8074),
    airport("SGN", "タンソンニャット", 10.8189, 106.6519),
];

const fn airport(code: &'static str, name: &'static str, latitude: f64, longitude: f64) -> Airport {
    Airport {
        code,
        name,
        latitude,
        longitude,
    }
}

// Keyed by both IATA code and display name.
static AIRPORT_INDEX: Lazy<HashMap<&'static str, &'static Airport>> = Lazy::new(|| {
    let mut index = HashMap::with_capacity(AIRPORTS.len() * 2);
    for airport in AIRPORTS {
        index.insert(airport.code, airport);
        index.insert(airport.name, airport);
    }
    index
});

pub fn lookup(key: &str) -> Option<&'static Airport> {
    AIRPORT_INDEX.get(key.trim()).copied()
}

pub fn coordinates(key: &str) -> Option<(f64, f64)> {
    lookup(key).map(|a| (a.latitude, a.longitude))
}

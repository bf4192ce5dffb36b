use chrono::Weekday;

use crate::entities::{hm, Category, Coordinates, Destination, OpeningHours};

const WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];
const WEEKEND: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];
const LATE_NIGHTS: [Weekday; 2] = [Weekday::Fri, Weekday::Sat];
const EARLY_NIGHTS: [Weekday; 5] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
];

/// Map center used before any location is known.
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lng: -9.1427,
    lat: 38.7110,
};

/// The curated venues the explorer starts from.
pub fn destinations() -> Vec<Destination> {
    vec![
        Destination::new(
            "cafe-bica-alta",
            "Bica Alta",
            Category::Cafe,
            Coordinates::new(-9.1466, 38.7103),
            OpeningHours::on(&WEEKDAYS, hm(7, 30), hm(19, 0)).and(&WEEKEND, hm(9, 0), hm(18, 0)),
        ),
        Destination::new(
            "cafe-torrefacao",
            "Torrefação do Largo",
            Category::Cafe,
            Coordinates::new(-9.1402, 38.7139),
            OpeningHours::daily(hm(8, 0), hm(20, 0)),
        ),
        Destination::new(
            "cafe-miradouro",
            "Café do Miradouro",
            Category::Cafe,
            Coordinates::new(-9.1445, 38.7155),
            OpeningHours::daily(hm(10, 0), hm(22, 0)),
        )
        .with_waypoints(vec![Coordinates::new(-9.1433, 38.7128)]),
        Destination::new(
            "cafe-estrela",
            "Estrela Grão",
            Category::Cafe,
            Coordinates::new(-9.1598, 38.7131),
            OpeningHours::on(&WEEKDAYS, hm(8, 0), hm(17, 0)),
        ),
        Destination::new(
            "cafe-alfama",
            "Pastelaria da Sé",
            Category::Cafe,
            Coordinates::new(-9.1334, 38.7099),
            OpeningHours::daily(hm(7, 0), hm(19, 30)),
        ),
        Destination::new(
            "cafe-cais",
            "Cais Tostado",
            Category::Cafe,
            Coordinates::new(-9.1451, 38.7068),
            OpeningHours::on(&WEEKDAYS, hm(8, 30), hm(18, 30))
                .and(&[Weekday::Sat], hm(10, 0), hm(16, 0)),
        ),
        Destination::new(
            "bar-adega",
            "Adega Escondida",
            Category::Bar,
            Coordinates::new(-9.1441, 38.7127),
            OpeningHours::on(&EARLY_NIGHTS, hm(18, 0), hm(0, 0))
                .and(&LATE_NIGHTS, hm(18, 0), hm(2, 0)),
        ),
        Destination::new(
            "bar-terraco",
            "Terraço Sete",
            Category::Bar,
            Coordinates::new(-9.1372, 38.7131),
            OpeningHours::daily(hm(16, 0), hm(1, 0)),
        )
        .with_waypoints(vec![
            Coordinates::new(-9.1395, 38.7118),
            Coordinates::new(-9.1381, 38.7126),
        ])
        .with_linked_route("escadinhas-loop"),
        Destination::new(
            "bar-tasca",
            "Tasca do Rio",
            Category::Bar,
            Coordinates::new(-9.1478, 38.7074),
            OpeningHours::on(&LATE_NIGHTS, hm(20, 0), hm(3, 0)),
        ),
        Destination::new(
            "bar-fado",
            "Vinho & Fado",
            Category::Bar,
            Coordinates::new(-9.1312, 38.7118),
            OpeningHours::on(&WEEKDAYS, hm(19, 0), hm(0, 0))
                .and(&WEEKEND, hm(17, 0), hm(1, 0)),
        ),
    ]
}

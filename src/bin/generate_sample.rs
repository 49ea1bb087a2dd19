//! Writes a small deterministic sample of the nuclear test dataset in the
//! RAW source schema (original column names, Latin-1 encoding, messy cells)
//! so the explorer can be exercised without the published CSV.

use csv::ByteRecord;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }
}

struct Site {
    country: &'static str,
    location: &'static str,
    lat: f64,
    lon: f64,
    first_year: i32,
    last_year: i32,
}

const SITES: [Site; 5] = [
    Site {
        country: "USA",
        location: "Nevada Ts",
        lat: 37.1,
        lon: -116.05,
        first_year: 1951,
        last_year: 1992,
    },
    Site {
        country: "USSR",
        location: "Semi Kazakh",
        lat: 49.95,
        lon: 78.8,
        first_year: 1949,
        last_year: 1989,
    },
    Site {
        country: "UK",
        location: "Monte Bello",
        lat: -20.4,
        lon: 115.55,
        first_year: 1952,
        last_year: 1957,
    },
    Site {
        country: "FRANCE",
        location: "Muruora Is",
        lat: -21.83,
        lon: -138.9,
        first_year: 1966,
        last_year: 1996,
    },
    Site {
        country: "CHINA",
        location: "Lop Nor",
        lat: 41.5,
        lon: 88.5,
        first_year: 1964,
        last_year: 1996,
    },
];

fn main() {
    let output_path = "sample_nuclear_explosions.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record([
            "WEAPON SOURCE COUNTRY",
            "WEAPON DEPLOYMENT LOCATION",
            "Data.Source",
            "Location.Cordinates.Latitude",
            "Location.Cordinates.Longitude",
            "Data.Magnitude.Body",
            "Data.Magnitude.Surface",
            "Location.Cordinates.Depth",
            "Data.Yeild.Lower",
            "Data.Yeild.Upper",
            "Data.Purpose",
            "Data.Name",
            "Data.Type",
            "Date.Day",
            "Date.Month",
            "Date.Year",
        ])
        .expect("Failed to write header");

    let mut rng = SimpleRng::new(230);
    let mut rows = 0usize;

    for (site_no, site) in SITES.iter().enumerate() {
        for i in 0..12 {
            let year = site.first_year
                + ((site.last_year - site.first_year) as f64 * rng.unit()) as i32;
            let lat = site.lat + rng.range(-0.5, 0.5);
            let lon = site.lon + rng.range(-0.5, 0.5);
            let yield_lower = rng.range(0.0, 200.0);
            let yield_upper = yield_lower + rng.range(0.0, 300.0);

            // Every few rows, drop or mangle optional cells the way the real
            // export does.
            let name: Vec<u8> = match i % 4 {
                0 => Vec::new(),
                // Latin-1 'é' to prove tolerant decoding.
                1 => {
                    let mut n = format!("Op{site_no}-{i} caf").into_bytes();
                    n.push(0xE9);
                    n
                }
                _ => format!("Shot {site_no}-{i}").into_bytes(),
            };
            let magnitude = if i % 3 == 0 {
                String::new()
            } else {
                format!("{:.1}", rng.range(4.0, 6.5))
            };
            let yields = if i % 5 == 4 {
                (String::from("n/a"), String::new())
            } else {
                (format!("{yield_lower:.1}"), format!("{yield_upper:.1}"))
            };

            let mut record = ByteRecord::new();
            record.push_field(site.country.as_bytes());
            record.push_field(site.location.as_bytes());
            record.push_field(b"DOE");
            record.push_field(format!("{lat:.3}").as_bytes());
            record.push_field(format!("{lon:.3}").as_bytes());
            record.push_field(magnitude.as_bytes());
            record.push_field(b"");
            record.push_field(format!("{:.1}", rng.range(-2.0, 0.5)).as_bytes());
            record.push_field(yields.0.as_bytes());
            record.push_field(yields.1.as_bytes());
            record.push_field(if i % 2 == 0 { b"Wr" as &[u8] } else { b"We" });
            record.push_field(&name);
            record.push_field(if i % 2 == 0 {
                b"Atmosph" as &[u8]
            } else {
                b"Shaft"
            });
            record.push_field(format!("{}", 1 + (rng.next_u64() % 28)).as_bytes());
            record.push_field(format!("{}", 1 + (rng.next_u64() % 12)).as_bytes());
            record.push_field(year.to_string().as_bytes());

            writer
                .write_byte_record(&record)
                .expect("Failed to write record");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} test records to {output_path}");
}

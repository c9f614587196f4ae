use anyhow::{Context, Result};
use serde_json::{Value, json};

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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }
}

/// (garment, positions, category) in English and Spanish.
struct Garment {
    en: (&'static str, &'static [&'static str], &'static str),
    es: (&'static str, &'static [&'static str], &'static str),
}

const GARMENTS: &[Garment] = &[
    Garment {
        en: ("Shirt", &["Collar", "Cuff", "Placket", "Sleeve"], "Tops"),
        es: ("Camisa", &["Cuello", "Puño", "Tapeta", "Manga"], "Superiores"),
    },
    Garment {
        en: ("Pants", &["Waist", "Pocket", "Hem", "Fly"], "Bottoms"),
        es: ("Pantalón", &["Cintura", "Bolsillo", "Bajo", "Bragueta"], "Inferiores"),
    },
    Garment {
        en: ("Jacket", &["Lapel", "Pocket", "Lining", "Sleeve"], "Outerwear"),
        es: ("Chaqueta", &["Solapa", "Bolsillo", "Forro", "Manga"], "Abrigos"),
    },
];

/// (operation, machine) pairs, English then Spanish.
const OPERATIONS: &[((&str, &str), (&str, &str))] = &[
    (("Sew", "Lockstitch"), ("Coser", "Recta")),
    (("Overlock", "Overlock 3T"), ("Sobrehilar", "Overlock 3H")),
    (("Topstitch", "Double needle"), ("Pespuntear", "Doble aguja")),
    (("Press", "Steam iron"), ("Planchar", "Plancha")),
];

fn data_row(n: usize, cells: [&str; 6]) -> Value {
    let mut row = vec![Value::String(n.to_string())];
    row.extend(cells.iter().map(|c| Value::String(c.to_string())));
    Value::Array(row)
}

fn header_block(title: &str, rows: usize, headers: [&str; 6]) -> Vec<Value> {
    let mut block = vec![json!([title])];
    block.extend((1..rows.saturating_sub(1)).map(|_| json!([])));
    block.push(data_row(0, headers));
    block
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut english = header_block(
        "MAK – CATALOGUE OF TIMES",
        2,
        ["TYPE OF GARMENT", "POSITION", "OPERATION", "MACHINE", "TIME (Secs)", "CATEGORY"],
    );
    let mut spanish = header_block(
        "MAK – CATALOGO DE TIEMPOS",
        9,
        ["TIPO DE PRENDA", "POSICION", "OPERACION", "MAQUINA", "TIEMPO", "CATEGORIA"],
    );

    let mut n = 0;
    for garment in GARMENTS {
        let (g_en, pos_en, cat_en) = garment.en;
        let (g_es, pos_es, cat_es) = garment.es;
        for (p_en, p_es) in pos_en.iter().zip(pos_es.iter()) {
            for &((op_en, m_en), (op_es, m_es)) in OPERATIONS {
                // Not every position needs every operation.
                if rng.range(0, 3) == 0 {
                    continue;
                }
                n += 1;
                let secs = rng.range(4, 90).to_string();
                english.push(data_row(n, [g_en, *p_en, op_en, m_en, secs.as_str(), cat_en]));
                spanish.push(data_row(n, [g_es, *p_es, op_es, m_es, secs.as_str(), cat_es]));
            }
        }
    }

    // A blank row and a row with only machine/time/category: both are dropped on load.
    english.push(json!(["", "", "", "", "", "", ""]));
    english.push(data_row(n + 1, ["", "", "", "Lockstitch", "12", "Tops"]));

    let workbook = json!({ "English": english, "Spanish": spanish });

    let output_path = "catalogue.json";
    let text = serde_json::to_string_pretty(&workbook).context("serializing workbook")?;
    std::fs::write(output_path, text).with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {n} operations per locale to {output_path}");
    Ok(())
}

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// Rail index visited by each text position when writing down and up the rails.
fn zigzag(len: usize, rails: usize) -> impl Iterator<Item = usize> {
    let mut rail = 0;
    let mut down = true;
    (0..len).map(move |_| {
        let current = rail;
        if down {
            rail += 1;
        } else {
            rail -= 1;
        }
        if rail == rails - 1 || rail == 0 {
            down = !down;
        }
        current
    })
}

/// Writes the text in a zigzag over `rails` rows and reads the rows in order.
///
/// Fewer than two rails leaves the text as is, and so does having at least
/// as many rails as characters since every character lands on its own rail.
pub fn encode(text: &str, rails: usize) -> String {
    let len = text.chars().count();
    if rails <= 1 || rails >= len {
        return text.into();
    }

    let mut fence = vec![String::new(); rails];
    for (c, rail) in text.chars().zip(zigzag(len, rails)) {
        fence[rail].push(c);
    }
    fence.concat()
}

pub fn decode(text: &str, rails: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if rails <= 1 || rails >= chars.len() {
        return text.into();
    }

    let pattern: Vec<usize> = zigzag(chars.len(), rails).collect();

    let mut lengths = vec![0; rails];
    for &rail in &pattern {
        lengths[rail] += 1;
    }

    // the ciphertext is the rails laid end to end, so each rail starts where
    // the previous one stopped
    let mut cursors = Vec::with_capacity(rails);
    let mut start = 0;
    for length in lengths {
        cursors.push(start);
        start += length;
    }

    pattern
        .into_iter()
        .map(|rail| {
            let c = chars[cursors[rail]];
            cursors[rail] += 1;
            c
        })
        .collect()
}

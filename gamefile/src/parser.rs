use std::str::FromStr;

use chumsky::error::Simple;
use chumsky::primitive::{choice, end, filter, just};
use chumsky::text::{self, TextParser};
use chumsky::Parser;
use solver::Player;

use crate::{EdgeRow, PayoffFile, RatioFile, VertexRow};

type Errors = Vec<Simple<char>>;

fn number() -> impl Parser<char, usize, Error = Simple<char>> + Clone {
    text::int(10)
        .try_map(|n: String, span| n.parse().map_err(|_| Simple::custom(span, "number too large")))
        .padded()
}

fn weight<T: FromStr>() -> impl Parser<char, T, Error = Simple<char>> + Clone {
    filter(|c: &char| !c.is_whitespace() && *c != ';')
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|w, span| w.parse().map_err(|_| Simple::custom(span, format!("invalid weight {w}"))))
        .padded()
}

fn header(keyword: &'static str) -> impl Parser<char, (usize, usize), Error = Simple<char>> + Clone {
    just(keyword).padded().ignore_then(number()).then(number()).then_ignore(just(';'))
}

fn vertex() -> impl Parser<char, VertexRow, Error = Simple<char>> + Clone {
    let player = choice((just('0').to(Player::P0), just('1').to(Player::P1))).padded();
    just('v')
        .padded()
        .ignore_then(number())
        .then(player)
        .then_ignore(just(';'))
        .map(|(id, player)| VertexRow { id, player })
}

fn edge<W>(
    weight: impl Parser<char, W, Error = Simple<char>> + Clone,
) -> impl Parser<char, EdgeRow<W>, Error = Simple<char>> + Clone {
    just('e')
        .padded()
        .ignore_then(number())
        .then(number())
        .then(weight)
        .then_ignore(just(';'))
        .map(|((source, target), weight)| EdgeRow { source, target, weight })
}

pub fn parse_payoff_game<T: FromStr>(source: &str) -> Result<PayoffFile<T>, Errors> {
    let game = header("payoff")
        .then(vertex().repeated())
        .then(edge(weight::<T>()).repeated())
        .then_ignore(text::whitespace())
        .then_ignore(end())
        .map(|(((vertex_count, edge_count), vertices), edges)| PayoffFile {
            vertex_count,
            edge_count,
            vertices,
            edges,
        });

    game.parse(source)
}

pub fn parse_ratio_game<T: FromStr>(source: &str) -> Result<RatioFile<T>, Errors> {
    let game = header("ratio")
        .then(vertex().repeated())
        .then(edge(weight::<T>().then(weight::<T>())).repeated())
        .then_ignore(text::whitespace())
        .then_ignore(end())
        .map(|(((vertex_count, edge_count), vertices), edges)| RatioFile {
            vertex_count,
            edge_count,
            vertices,
            edges,
        });

    game.parse(source)
}
